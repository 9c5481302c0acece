pub mod check;
pub mod list;
pub mod suggest;

use std::collections::HashMap;
use std::path::Path;

use skein_format::diagnostics::{Severity, render_diagnostics};
use skein_format::workspace;
use skein_scene::ProjectIndex;

/// A loaded project: the built index plus diagnostic counts.
pub(crate) struct Project {
    pub index: ProjectIndex,
    pub errors: usize,
    pub warnings: usize,
}

/// Scan a directory, build the index, and print diagnostics to stderr.
fn load_project(dir: &Path) -> Result<Project, String> {
    let files =
        workspace::scan_workspace(dir).map_err(|e| format!("cannot read {}: {e}", dir.display()))?;
    if files.is_empty() {
        return Err(format!("no scene files found in {}", dir.display()));
    }

    let sources: HashMap<&str, &str> = files
        .iter()
        .map(|f| (f.path.as_str(), f.source.as_str()))
        .collect();
    let result = skein_format::build_index(&files);

    let mut errors = 0;
    let mut warnings = 0;
    let mut paths: Vec<&String> = result.diagnostics.keys().collect();
    paths.sort();
    for path in paths {
        let diags = &result.diagnostics[path];
        if diags.is_empty() {
            continue;
        }
        errors += diags.iter().filter(|d| d.severity == Severity::Error).count();
        warnings += diags
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count();
        let source = sources.get(path.as_str()).copied().unwrap_or_default();
        eprint!("{}", render_diagnostics(source, path, diags));
    }
    if errors > 0 || warnings > 0 {
        eprintln!(
            "  {} error{}, {} warning{}",
            errors,
            plural(errors),
            warnings,
            plural(warnings),
        );
    }

    Ok(Project {
        index: result.index,
        errors,
        warnings,
    })
}

/// Load a project and fail when its scene files contain errors.
pub(crate) fn project_or_fail(dir: &Path) -> Result<Project, String> {
    let project = load_project(dir)?;
    if project.errors > 0 {
        Err("scene files contain errors".into())
    } else {
        Ok(project)
    }
}

pub(crate) fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}
