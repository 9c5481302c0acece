use std::collections::HashSet;

use skein_scene::paths;
use skein_scene::{Instance, ProjectIndex};

use crate::suggest::Suggestion;

/// Resolve every addressable entity reachable from a script.
///
/// Two independent sources are concatenated: components attached to the game
/// objects this script is attached to, then the instance trees of the
/// collections containing it, flattened depth-first. Both sources missing is
/// an empty result — the caller offers nothing, it is not an error.
pub fn resolve(index: &ProjectIndex, script_path: &str) -> Vec<Suggestion> {
    let path = paths::project_path(script_path);

    let mut suggestions: Vec<Suggestion> = index
        .find_attached_components(&path)
        .into_iter()
        .map(Suggestion::component)
        .collect();

    let mut visited = HashSet::new();
    for instance in index.find_containing_instances(&path) {
        expand(instance, &mut visited, &mut suggestions);
    }
    suggestions
}

/// Depth-first flatten of one instance: the instance itself, child instances
/// recursively, then its own components in declaration order.
///
/// The index owns its trees by value, so genuine cycles cannot be built — the
/// visited set is a guard against malformed data repeating a URL, cutting the
/// descent instead of looping or duplicating.
fn expand(instance: &Instance, visited: &mut HashSet<String>, out: &mut Vec<Suggestion>) {
    if !visited.insert(instance.url.clone()) {
        return;
    }
    out.push(Suggestion::instance(instance));
    for child in &instance.instances {
        expand(child, visited, out);
    }
    for component in &instance.components {
        out.push(Suggestion::component(component));
    }
}
