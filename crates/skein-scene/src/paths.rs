//! Path and address conventions.
//!
//! Everything in a Skein project is keyed by its project-absolute path: forward
//! slashes, rooted at the project directory, with a leading `/` (for example
//! `/objects/hero.go`). Runtime addresses are built from these paths as
//! `socket:/instance/path#fragment`.

/// File extension of engine script files.
pub const SCRIPT_EXTENSION: &str = "script";

/// File extension of game object files.
pub const GAME_OBJECT_EXTENSION: &str = "go";

/// File extension of collection files.
pub const COLLECTION_EXTENSION: &str = "collection";

/// Normalize a workspace-relative path to the project-absolute keying
/// convention by prefixing a separator. Already-absolute paths pass through.
pub fn project_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// The final path segment, e.g. `hero.go` for `/objects/hero.go`.
pub fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// The file name without its extension, e.g. `hero` for `/objects/hero.go`.
pub fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

/// The extension of the final path segment, if it has one.
pub fn extension(path: &str) -> Option<&str> {
    match file_name(path).rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}

/// Whether a path refers to an engine script file.
pub fn is_script(path: &str) -> bool {
    extension(path) == Some(SCRIPT_EXTENSION)
}
