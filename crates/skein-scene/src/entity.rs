use serde::{Deserialize, Serialize};

/// A leaf entity attached to a game object: a script, sprite, sound, or any
/// other behavior/data unit the engine can address at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Fully qualified runtime address. For a component attached to the same
    /// game object as the addressing script this is fragment-only (`#sprite`);
    /// inside a collection it is the full form (`main:/hero#sprite`).
    pub url: String,
    /// Component kind, e.g. `script` or `sprite`. Referenced components take
    /// their kind from the referenced file's extension.
    pub kind: String,
    /// Name of the scene file the component is declared in.
    pub filename: String,
    /// Short local identifier, unique within the owning game object.
    pub id: String,
}

impl Component {
    /// Create a component entity.
    pub fn new(
        url: impl Into<String>,
        kind: impl Into<String>,
        filename: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            kind: kind.into(),
            filename: filename.into(),
            id: id.into(),
        }
    }
}

/// An embedded game object or collection inside a scene: a node of the
/// instance tree that may own further instances and components.
///
/// Ownership is structural — an instance exclusively owns its children, so the
/// containment relation is a tree by construction. The builder is still
/// responsible for not splicing a collection into itself (see the cycle guard
/// in `skein-format`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Fully qualified runtime address, e.g. `main:/hud/healthbar`.
    pub url: String,
    /// Instance kind: `go` for game objects, `collection` for spliced
    /// sub-collections.
    pub kind: String,
    /// Name of the scene file the instance is declared in.
    pub filename: String,
    /// Child instances nested under this one.
    pub instances: Vec<Instance>,
    /// Components directly owned by this instance, in declaration order.
    pub components: Vec<Component>,
}

impl Instance {
    /// Create an instance entity with no children.
    pub fn new(
        url: impl Into<String>,
        kind: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            kind: kind.into(),
            filename: filename.into(),
            instances: Vec::new(),
            components: Vec::new(),
        }
    }
}
