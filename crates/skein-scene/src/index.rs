use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entity::{Component, Instance};
use crate::error::{SceneError, SceneResult};

/// The indexed view of one game object file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameObject {
    /// Project-absolute path of the `.go` file.
    pub path: String,
    /// Components in declaration order, with fragment-only URLs — the view a
    /// script attached to this game object addresses its siblings through.
    pub components: Vec<Component>,
    /// Project-absolute paths of the script files attached to this game
    /// object.
    pub scripts: Vec<String>,
}

/// The indexed view of one collection file: its fully expanded instance trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// Project-absolute path of the `.collection` file.
    pub path: String,
    /// Socket name used as the URL scheme for instances of this collection.
    pub name: String,
    /// Top-level instances in declaration order, each carrying its expanded
    /// subtree.
    pub instances: Vec<Instance>,
    /// Project-absolute paths of every script reachable anywhere in the
    /// instance trees, including through spliced sub-collections.
    pub scripts: Vec<String>,
}

impl Collection {
    /// Total number of instances across all trees.
    pub fn instance_count(&self) -> usize {
        fn walk(instance: &Instance) -> usize {
            1 + instance.instances.iter().map(walk).sum::<usize>()
        }
        self.instances.iter().map(walk).sum()
    }

    /// Total number of components across all trees.
    pub fn component_count(&self) -> usize {
        fn walk(instance: &Instance) -> usize {
            instance.components.len() + instance.instances.iter().map(walk).sum::<usize>()
        }
        self.instances.iter().map(walk).sum()
    }
}

/// The project index: a queryable representation of the project's game object
/// and collection hierarchy, keyed by project-absolute file path.
///
/// The index is handed to consumers by reference — there is no process-wide
/// instance, so tests can fabricate one per case.
#[derive(Debug, Clone, Default)]
pub struct ProjectIndex {
    game_objects: HashMap<String, GameObject>,
    collections: HashMap<String, Collection>,

    // Reverse maps, script path -> indexed file paths, in insertion order.
    attached_to: HashMap<String, Vec<String>>,
    contained_in: HashMap<String, Vec<String>>,
}

impl ProjectIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a game object. Its attached scripts become queryable through
    /// [`ProjectIndex::find_attached_components`].
    pub fn insert_game_object(&mut self, game_object: GameObject) -> SceneResult<()> {
        if !game_object.path.starts_with('/') {
            return Err(SceneError::RelativePath(game_object.path));
        }
        if self.game_objects.contains_key(&game_object.path) {
            return Err(SceneError::DuplicatePath(game_object.path));
        }

        for script in &game_object.scripts {
            self.attached_to
                .entry(script.clone())
                .or_default()
                .push(game_object.path.clone());
        }
        self.game_objects
            .insert(game_object.path.clone(), game_object);
        Ok(())
    }

    /// Index a collection. Scripts reachable from its instance trees become
    /// queryable through [`ProjectIndex::find_containing_instances`].
    pub fn insert_collection(&mut self, collection: Collection) -> SceneResult<()> {
        if !collection.path.starts_with('/') {
            return Err(SceneError::RelativePath(collection.path));
        }
        if self.collections.contains_key(&collection.path) {
            return Err(SceneError::DuplicatePath(collection.path));
        }

        for script in &collection.scripts {
            self.contained_in
                .entry(script.clone())
                .or_default()
                .push(collection.path.clone());
        }
        self.collections
            .insert(collection.path.clone(), collection);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    /// Components attached to the game objects that also attach the given
    /// script. A miss is an empty result, not an error.
    pub fn find_attached_components(&self, script_path: &str) -> Vec<&Component> {
        self.attached_to
            .get(script_path)
            .map(|paths| {
                paths
                    .iter()
                    .filter_map(|p| self.game_objects.get(p))
                    .flat_map(|go| go.components.iter())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Top-level instances of the collections that contain the given script
    /// anywhere in their trees. A miss is an empty result, not an error.
    pub fn find_containing_instances(&self, script_path: &str) -> Vec<&Instance> {
        self.contained_in
            .get(script_path)
            .map(|paths| {
                paths
                    .iter()
                    .filter_map(|p| self.collections.get(p))
                    .flat_map(|c| c.instances.iter())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Look up an indexed game object by path.
    pub fn game_object(&self, path: &str) -> Option<&GameObject> {
        self.game_objects.get(path)
    }

    /// Look up an indexed collection by path.
    pub fn collection(&self, path: &str) -> Option<&Collection> {
        self.collections.get(path)
    }

    /// All indexed game objects, in no particular order.
    pub fn game_objects(&self) -> impl Iterator<Item = &GameObject> {
        self.game_objects.values()
    }

    /// All indexed collections, in no particular order.
    pub fn collections(&self) -> impl Iterator<Item = &Collection> {
        self.collections.values()
    }

    /// Number of indexed game object files.
    pub fn game_object_count(&self) -> usize {
        self.game_objects.len()
    }

    /// Number of indexed collection files.
    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }
}
