//! Typed extraction on top of the generic field documents.
//!
//! The loader pulls out the fields the index cares about and ignores the rest
//! (transforms, blend modes, whatever else the editor writes). Structural
//! problems become diagnostics; extraction always produces as much as it can.

use std::collections::HashSet;

use crate::ast::{self, Document, Field};
use crate::diagnostics::Diagnostic;
use skein_scene::paths;

/// A component declaration inside a game object or an embedded instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentDecl {
    /// Local identifier.
    pub id: String,
    /// Project path of the referenced component file, when the component is
    /// not embedded.
    pub reference: Option<String>,
    /// Component kind: the referenced file's extension, or the declared
    /// `type` of an embedded component.
    pub kind: String,
    /// Span of the declaring block.
    pub span: ast::Span,
}

/// Typed contents of a game object file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameObjectData {
    /// Component declarations in file order.
    pub components: Vec<ComponentDecl>,
}

/// What an instance declaration points at.
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceBody {
    /// References a game object prototype file.
    Prototype(String),
    /// Carries its game object content inline.
    Embedded(Vec<ComponentDecl>),
    /// Splices another collection file.
    Collection(String),
}

/// One instance declaration inside a collection file.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceDecl {
    /// Local identifier, one path segment of descendant URLs.
    pub id: String,
    /// What the instance points at.
    pub body: InstanceBody,
    /// Span of the declaring block.
    pub span: ast::Span,
}

/// Typed contents of a collection file.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionData {
    /// Socket name: the `name` field, or the file stem when absent.
    pub name: String,
    /// Instance declarations in file order.
    pub instances: Vec<InstanceDecl>,
}

/// Extract the component declarations of a game object document.
pub fn game_object(doc: &Document, diagnostics: &mut Vec<Diagnostic>) -> GameObjectData {
    GameObjectData {
        components: components_of(&doc.fields, diagnostics),
    }
}

/// Extract the socket name and instance declarations of a collection document.
pub fn collection(path: &str, doc: &Document, diagnostics: &mut Vec<Diagnostic>) -> CollectionData {
    let name = ast::find_str(&doc.fields, "name")
        .unwrap_or_else(|| paths::file_stem(path))
        .to_string();

    let mut instances = Vec::new();
    let mut seen = HashSet::new();
    for field in &doc.fields {
        if !matches!(
            field.name.as_str(),
            "instances" | "embedded_instances" | "collection_instances"
        ) {
            continue;
        }
        let Some(children) = field.children() else {
            diagnostics.push(Diagnostic::error(
                field.span.clone(),
                format!("\"{}\" must be a block", field.name),
            ));
            continue;
        };
        let Some(id) = required_id(field, children, diagnostics) else {
            continue;
        };
        let body = match field.name.as_str() {
            "instances" => match ast::find_str(children, "prototype") {
                Some(prototype) => InstanceBody::Prototype(prototype.to_string()),
                None => {
                    diagnostics.push(Diagnostic::error(
                        field.span.clone(),
                        format!("instance \"{id}\" is missing a \"prototype\" reference"),
                    ));
                    continue;
                }
            },
            "embedded_instances" => {
                let data = children
                    .iter()
                    .find(|f| f.name == "data")
                    .and_then(Field::children)
                    .unwrap_or_default();
                InstanceBody::Embedded(components_of(data, diagnostics))
            }
            _ => match ast::find_str(children, "collection") {
                Some(collection) => InstanceBody::Collection(collection.to_string()),
                None => {
                    diagnostics.push(Diagnostic::error(
                        field.span.clone(),
                        format!("instance \"{id}\" is missing a \"collection\" reference"),
                    ));
                    continue;
                }
            },
        };

        if !seen.insert(id.clone()) {
            diagnostics.push(Diagnostic::error(
                field.span.clone(),
                format!("duplicate instance id \"{id}\""),
            ));
            continue;
        }
        instances.push(InstanceDecl {
            id,
            body,
            span: field.span.clone(),
        });
    }

    CollectionData { name, instances }
}

/// Extract component declarations (`components` and `embedded_components`
/// blocks) from a field list.
fn components_of(fields: &[Field], diagnostics: &mut Vec<Diagnostic>) -> Vec<ComponentDecl> {
    let mut components = Vec::new();
    let mut seen = HashSet::new();
    for field in fields {
        if !matches!(field.name.as_str(), "components" | "embedded_components") {
            continue;
        }
        let Some(children) = field.children() else {
            diagnostics.push(Diagnostic::error(
                field.span.clone(),
                format!("\"{}\" must be a block", field.name),
            ));
            continue;
        };
        let Some(id) = required_id(field, children, diagnostics) else {
            continue;
        };

        let (reference, kind) = if field.name == "components" {
            match ast::find_str(children, "component") {
                Some(reference) => {
                    let kind = paths::extension(reference).unwrap_or("component");
                    (Some(reference.to_string()), kind.to_string())
                }
                None => {
                    diagnostics.push(Diagnostic::error(
                        field.span.clone(),
                        format!("component \"{id}\" is missing a \"component\" reference"),
                    ));
                    continue;
                }
            }
        } else {
            let kind = ast::find_text(children, "type").unwrap_or("component");
            (None, kind.to_string())
        };

        if !seen.insert(id.clone()) {
            diagnostics.push(Diagnostic::error(
                field.span.clone(),
                format!("duplicate component id \"{id}\""),
            ));
            continue;
        }
        components.push(ComponentDecl {
            id,
            reference,
            kind,
            span: field.span.clone(),
        });
    }
    components
}

/// The `id` field of a declaration block, or a diagnostic when missing.
fn required_id(
    field: &Field,
    children: &[Field],
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<String> {
    match ast::find_str(children, "id") {
        Some(id) => Some(id.to_string()),
        None => {
            diagnostics.push(Diagnostic::error(
                field.span.clone(),
                format!("\"{}\" block is missing an \"id\" field", field.name),
            ));
            None
        }
    }
}
