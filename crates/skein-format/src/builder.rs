//! Project index construction: parse every scene file, then resolve
//! cross-file references into expanded instance trees.

use std::collections::{BTreeMap, HashMap, HashSet};

use skein_scene::paths;
use skein_scene::{Collection, Component, GameObject, Instance, ProjectIndex};

use crate::diagnostics::{self, Diagnostic};
use crate::loader::{self, CollectionData, ComponentDecl, GameObjectData, InstanceBody, InstanceDecl};
use crate::parse_source;

/// Scene file classification by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// A `.go` game object file.
    GameObject,
    /// A `.collection` scene file.
    Collection,
}

impl FileKind {
    /// Classify a path by extension; `None` for files the index ignores.
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = paths::extension(path)?;
        if ext == paths::GAME_OBJECT_EXTENSION {
            Some(Self::GameObject)
        } else if ext == paths::COLLECTION_EXTENSION {
            Some(Self::Collection)
        } else {
            None
        }
    }
}

/// A scene file handed to the index builder.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Project-absolute path.
    pub path: String,
    /// Classification by extension.
    pub kind: FileKind,
    /// File content.
    pub source: String,
}

impl SourceFile {
    /// Normalize and classify a scene file; `None` when the extension is not
    /// a scene format.
    pub fn new(path: impl Into<String>, source: impl Into<String>) -> Option<Self> {
        let path = paths::project_path(&path.into());
        let kind = FileKind::from_path(&path)?;
        Some(Self {
            path,
            kind,
            source: source.into(),
        })
    }
}

/// Result of building a project index.
#[derive(Debug)]
pub struct IndexResult {
    /// The built index.
    pub index: ProjectIndex,
    /// Per-file diagnostics keyed by project path. Every input file has an
    /// entry, empty when the file is clean — editors use that to clear stale
    /// diagnostics.
    pub diagnostics: HashMap<String, Vec<Diagnostic>>,
}

impl IndexResult {
    /// Whether any file produced an error diagnostic.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .values()
            .any(|diags| diagnostics::has_errors(diags))
    }
}

/// Build a project index from a set of scene files.
///
/// Game objects index their attachment view (fragment URLs). Collections get
/// fully expanded instance trees, splicing referenced prototypes and
/// sub-collections. Dangling references and cyclic splices degrade to
/// warnings — the editor keeps working with whatever resolved.
pub fn build_index(files: &[SourceFile]) -> IndexResult {
    let mut diags: HashMap<String, Vec<Diagnostic>> = HashMap::new();
    // BTreeMaps keep the later passes in path order, so rebuilding an
    // unchanged workspace produces an identical index.
    let mut gos: BTreeMap<String, GameObjectData> = BTreeMap::new();
    let mut cols: BTreeMap<String, CollectionData> = BTreeMap::new();

    for file in files {
        if gos.contains_key(&file.path) || cols.contains_key(&file.path) {
            diags.entry(file.path.clone()).or_default().push(Diagnostic::error(
                0..0,
                format!("duplicate scene file \"{}\"", file.path),
            ));
            continue;
        }
        let (doc, mut file_diags) = parse_source(&file.source);
        match file.kind {
            FileKind::GameObject => {
                gos.insert(file.path.clone(), loader::game_object(&doc, &mut file_diags));
            }
            FileKind::Collection => {
                cols.insert(
                    file.path.clone(),
                    loader::collection(&file.path, &doc, &mut file_diags),
                );
            }
        }
        diags.entry(file.path.clone()).or_default().extend(file_diags);
    }

    let mut index = ProjectIndex::new();
    for (path, data) in &gos {
        let filename = paths::file_name(path);
        let components = data
            .components
            .iter()
            .map(|decl| {
                Component::new(
                    format!("#{}", decl.id),
                    decl.kind.as_str(),
                    filename,
                    decl.id.as_str(),
                )
            })
            .collect();
        let scripts = data
            .components
            .iter()
            .filter_map(|decl| decl.reference.as_deref())
            .filter(|reference| paths::is_script(reference))
            .map(str::to_string)
            .collect();
        let game_object = GameObject {
            path: path.clone(),
            components,
            scripts,
        };
        if let Err(e) = index.insert_game_object(game_object) {
            diags
                .entry(path.clone())
                .or_default()
                .push(Diagnostic::error(0..0, e.to_string()));
        }
    }

    let mut built = Vec::new();
    {
        let mut expander = Expander {
            gos: &gos,
            cols: &cols,
            diags: &mut diags,
        };
        for (path, data) in &cols {
            let mut scripts = Vec::new();
            let mut visiting = HashSet::from([path.clone()]);
            let prefix = format!("{}:", data.name);
            let instances = expander.expand(
                &data.instances,
                &prefix,
                paths::file_name(path),
                path,
                &mut visiting,
                &mut scripts,
            );
            built.push(Collection {
                path: path.clone(),
                name: data.name.clone(),
                instances,
                scripts: dedup(scripts),
            });
        }
    }
    for collection in built {
        let path = collection.path.clone();
        if let Err(e) = index.insert_collection(collection) {
            diags
                .entry(path)
                .or_default()
                .push(Diagnostic::error(0..0, e.to_string()));
        }
    }

    IndexResult {
        index,
        diagnostics: diags,
    }
}

struct Expander<'a> {
    gos: &'a BTreeMap<String, GameObjectData>,
    cols: &'a BTreeMap<String, CollectionData>,
    diags: &'a mut HashMap<String, Vec<Diagnostic>>,
}

impl Expander<'_> {
    /// Expand instance declarations into owned instance trees.
    ///
    /// `prefix` is the URL up to this level's separator, `declared_in` the
    /// file name recorded on produced instances, `source_path` the project
    /// path whose diagnostics receive problems found in these declarations.
    /// `visiting` holds the collection paths on the current splice chain.
    fn expand(
        &mut self,
        decls: &[InstanceDecl],
        prefix: &str,
        declared_in: &str,
        source_path: &str,
        visiting: &mut HashSet<String>,
        scripts: &mut Vec<String>,
    ) -> Vec<Instance> {
        let mut instances = Vec::new();
        for decl in decls {
            let url = format!("{prefix}/{}", decl.id);
            match &decl.body {
                InstanceBody::Prototype(prototype) => {
                    let mut instance = Instance::new(url.as_str(), "go", declared_in);
                    if let Some(data) = self.gos.get(prototype) {
                        instance.components = instance_components(
                            &data.components,
                            &url,
                            paths::file_name(prototype),
                            scripts,
                        );
                    } else {
                        self.report(
                            source_path,
                            Diagnostic::warning(
                                decl.span.clone(),
                                format!("unknown prototype \"{prototype}\""),
                            ),
                        );
                    }
                    instances.push(instance);
                }
                InstanceBody::Embedded(components) => {
                    let mut instance = Instance::new(url.as_str(), "go", declared_in);
                    instance.components =
                        instance_components(components, &url, declared_in, scripts);
                    instances.push(instance);
                }
                InstanceBody::Collection(collection) => {
                    let mut instance = Instance::new(url.as_str(), "collection", declared_in);
                    if let Some(data) = self.cols.get(collection) {
                        if visiting.insert(collection.clone()) {
                            instance.instances = self.expand(
                                &data.instances,
                                &url,
                                paths::file_name(collection),
                                collection,
                                visiting,
                                scripts,
                            );
                            visiting.remove(collection);
                        } else {
                            self.report(
                                source_path,
                                Diagnostic::warning(
                                    decl.span.clone(),
                                    format!(
                                        "collection \"{collection}\" splices itself; not descending"
                                    ),
                                ),
                            );
                        }
                    } else {
                        self.report(
                            source_path,
                            Diagnostic::warning(
                                decl.span.clone(),
                                format!("unknown collection \"{collection}\""),
                            ),
                        );
                    }
                    instances.push(instance);
                }
            }
        }
        instances
    }

    fn report(&mut self, path: &str, diagnostic: Diagnostic) {
        self.diags
            .entry(path.to_string())
            .or_default()
            .push(diagnostic);
    }
}

/// Components owned by one instance, with full URLs. Script references are
/// collected into `scripts` along the way.
fn instance_components(
    decls: &[ComponentDecl],
    instance_url: &str,
    declared_in: &str,
    scripts: &mut Vec<String>,
) -> Vec<Component> {
    decls
        .iter()
        .map(|decl| {
            if let Some(reference) = decl.reference.as_deref()
                && paths::is_script(reference)
            {
                scripts.push(reference.to_string());
            }
            Component::new(
                format!("{instance_url}#{}", decl.id),
                decl.kind.as_str(),
                declared_in,
                decl.id.as_str(),
            )
        })
        .collect()
}

/// Order-preserving dedup.
fn dedup(scripts: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    scripts
        .into_iter()
        .filter(|script| seen.insert(script.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, source: &str) -> SourceFile {
        SourceFile::new(path, source).expect("scene file")
    }

    fn test_project() -> Vec<SourceFile> {
        vec![
            file(
                "/objects/hero.go",
                "components {\n  id: \"control\"\n  component: \"/scripts/hero.script\"\n}\n\
                 embedded_components {\n  id: \"sprite\"\n  type: \"sprite\"\n}",
            ),
            file(
                "/main.collection",
                "name: \"main\"\n\
                 instances {\n  id: \"hero\"\n  prototype: \"/objects/hero.go\"\n}\n\
                 embedded_instances {\n  id: \"camera\"\n  data {\n    components {\n      id: \"follow\"\n      component: \"/scripts/follow.script\"\n    }\n  }\n}\n\
                 collection_instances {\n  id: \"hud\"\n  collection: \"/ui/hud.collection\"\n}",
            ),
            file(
                "/ui/hud.collection",
                "name: \"hud\"\n\
                 embedded_instances {\n  id: \"bar\"\n  data {\n    components {\n      id: \"health\"\n      component: \"/scripts/health.script\"\n    }\n  }\n}",
            ),
        ]
    }

    #[test]
    fn clean_project_has_empty_diagnostics_per_file() {
        let result = build_index(&test_project());
        assert!(!result.has_errors());
        assert_eq!(result.diagnostics.len(), 3);
        assert!(result.diagnostics.values().all(|d| d.is_empty()));
    }

    #[test]
    fn game_object_attachment_view() {
        let result = build_index(&test_project());
        let components = result
            .index
            .find_attached_components("/scripts/hero.script");
        let urls: Vec<_> = components.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(urls, vec!["#control", "#sprite"]);
        assert_eq!(components[0].filename, "hero.go");
        assert_eq!(components[0].kind, "script");
    }

    #[test]
    fn collection_trees_are_expanded() {
        let result = build_index(&test_project());
        let collection = result.index.collection("/main.collection").expect("main");

        let urls: Vec<_> = collection.instances.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["main:/hero", "main:/camera", "main:/hud"]);

        let hero = &collection.instances[0];
        assert_eq!(hero.kind, "go");
        assert_eq!(hero.components[0].url, "main:/hero#control");
        assert_eq!(hero.components[0].filename, "hero.go");

        let hud = &collection.instances[2];
        assert_eq!(hud.kind, "collection");
        assert_eq!(hud.instances[0].url, "main:/hud/bar");
        assert_eq!(hud.instances[0].filename, "hud.collection");
        assert_eq!(hud.instances[0].components[0].url, "main:/hud/bar#health");
    }

    #[test]
    fn scripts_are_collected_transitively() {
        let result = build_index(&test_project());
        let collection = result.index.collection("/main.collection").expect("main");
        assert_eq!(
            collection.scripts,
            vec![
                "/scripts/hero.script".to_string(),
                "/scripts/follow.script".to_string(),
                "/scripts/health.script".to_string(),
            ]
        );

        // The spliced script is reachable from both collections, so both
        // top-level instance sets come back: main's three plus hud's one.
        let containing = result
            .index
            .find_containing_instances("/scripts/health.script");
        assert_eq!(containing.len(), 4);
    }

    #[test]
    fn unknown_prototype_degrades_to_warning() {
        let result = build_index(&[file(
            "/main.collection",
            "instances {\n  id: \"ghost\"\n  prototype: \"/missing.go\"\n}",
        )]);
        assert!(!result.has_errors());
        let diags = &result.diagnostics["/main.collection"];
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("unknown prototype"));

        // The instance itself still resolves, just without components.
        let collection = result.index.collection("/main.collection").expect("main");
        assert_eq!(collection.instances[0].url, "main:/ghost");
        assert!(collection.instances[0].components.is_empty());
    }

    #[test]
    fn cyclic_splice_terminates_with_warning() {
        let result = build_index(&[
            file(
                "/a.collection",
                "name: \"a\"\ncollection_instances {\n  id: \"b\"\n  collection: \"/b.collection\"\n}",
            ),
            file(
                "/b.collection",
                "name: \"b\"\ncollection_instances {\n  id: \"a\"\n  collection: \"/a.collection\"\n}",
            ),
        ]);
        assert!(!result.has_errors());
        let warnings: usize = result.diagnostics.values().map(Vec::len).sum();
        assert_eq!(warnings, 2);

        let a = result.index.collection("/a.collection").expect("a");
        assert_eq!(a.instances[0].url, "a:/b");
        // b was spliced once; the cycle back into a was cut.
        assert_eq!(a.instances[0].instances[0].url, "a:/b/a");
        assert!(a.instances[0].instances[0].instances.is_empty());
    }

    #[test]
    fn duplicate_file_is_an_error() {
        let source = "components {\n  id: \"c\"\n  component: \"/s.script\"\n}";
        let result = build_index(&[file("/x.go", source), file("/x.go", source)]);
        assert!(result.has_errors());
    }

    #[test]
    fn parse_errors_land_on_their_file() {
        let result = build_index(&[file("/bad.go", "components {")]);
        assert!(result.has_errors());
        assert!(
            result.diagnostics["/bad.go"]
                .iter()
                .any(|d| d.message.contains("unclosed block"))
        );
    }
}
