use std::io;
use std::path::{Path, PathBuf};

use crate::builder::{FileKind, SourceFile};

/// Recursively collect the paths of all scene files under `root`, sorted.
///
/// Hidden directories and build output are skipped. Unreadable directories
/// are silently ignored — a half-readable workspace still indexes.
pub fn scene_file_paths(root: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    collect(root, &mut out);
    out.sort();
    out
}

fn collect(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.is_dir() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str())
                && !name.starts_with('.')
                && name != "target"
                && name != "build"
            {
                collect(&path, out);
            }
        } else if let Some(name) = path.to_str()
            && FileKind::from_path(name).is_some()
        {
            out.push(path);
        }
    }
}

/// Project-absolute path of `path` relative to `root`: forward slashes and a
/// leading `/`, regardless of platform. `None` when `path` is outside `root`.
pub fn project_path_of(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut out = String::new();
    for component in relative.components() {
        out.push('/');
        out.push_str(&component.as_os_str().to_string_lossy());
    }
    if out.is_empty() { None } else { Some(out) }
}

/// Read every scene file under `root` from disk.
///
/// Fails only when `root` itself is not a readable directory; individual
/// unreadable files are skipped.
pub fn scan_workspace(root: &Path) -> io::Result<Vec<SourceFile>> {
    if !root.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("not a directory: {}", root.display()),
        ));
    }

    let mut files = Vec::new();
    for path in scene_file_paths(root) {
        let Some(project_path) = project_path_of(root, &path) else {
            continue;
        };
        let Ok(source) = std::fs::read_to_string(&path) else {
            continue;
        };
        if let Some(file) = SourceFile::new(project_path, source) {
            files.push(file);
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_path_of_builds_absolute_keys() {
        let root = Path::new("/home/me/game");
        let path = Path::new("/home/me/game/objects/hero.go");
        assert_eq!(
            project_path_of(root, path).as_deref(),
            Some("/objects/hero.go")
        );
    }

    #[test]
    fn project_path_of_rejects_outside_paths() {
        let root = Path::new("/home/me/game");
        assert_eq!(project_path_of(root, Path::new("/etc/passwd")), None);
        assert_eq!(project_path_of(root, root), None);
    }
}
