use serde::{Deserialize, Serialize};

use skein_scene::{Component, Instance};

/// What kind of entity a suggestion stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// An embedded game object or spliced collection.
    Instance,
    /// A component attached to a game object.
    Component,
}

/// One completion suggestion, ready for display.
///
/// Suggestions are ephemeral — built fresh per request from the index and
/// dropped once rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Text shown in the completion list: the entity's full address.
    pub label: String,
    /// Type annotation rendered next to the label. The leading space matches
    /// the engine editor's rendering of the same list.
    pub detail: String,
    /// Name of the scene file the entity originates from.
    pub description: String,
    /// What the host matches against the user's typing. Components match on
    /// their short id; instances have no identifier shorter than the address.
    pub filter_text: String,
    /// Entity classification, for editor item kinds.
    pub kind: SuggestionKind,
}

impl Suggestion {
    /// Format a component entity.
    pub fn component(component: &Component) -> Self {
        Self::entity(
            &component.url,
            &component.kind,
            &component.filename,
            &component.id,
            SuggestionKind::Component,
        )
    }

    /// Format an instance entity.
    pub fn instance(instance: &Instance) -> Self {
        Self::entity(
            &instance.url,
            &instance.kind,
            &instance.filename,
            &instance.url,
            SuggestionKind::Instance,
        )
    }

    fn entity(
        url: &str,
        kind_name: &str,
        filename: &str,
        filter_text: &str,
        kind: SuggestionKind,
    ) -> Self {
        Self {
            label: url.to_string(),
            detail: format!(" {kind_name}"),
            description: filename.to_string(),
            filter_text: filter_text.to_string(),
            kind,
        }
    }
}
