// src/watch/path_utils.rs

//! Path helpers for turning watcher events into project-relative paths.

use std::path::Path;

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// Tries a direct `strip_prefix(root)` first; if that fails (symlinked
/// temp dirs, `/private/var` on macOS) both paths are canonicalized and the
/// strip is retried. A path that was just deleted cannot be canonicalized,
/// so its parent is canonicalized instead.
///
/// Returns `None` if the path cannot be related to `root`.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    if let Ok(rel) = path.strip_prefix(root) {
        return Some(to_slash(rel));
    }

    let root_canon = root.canonicalize().ok()?;

    if let Ok(path_canon) = path.canonicalize() {
        return path_canon.strip_prefix(&root_canon).ok().map(to_slash);
    }

    let parent = path.parent()?.canonicalize().ok()?;
    let rel_parent = parent.strip_prefix(&root_canon).ok()?;
    let joined = rel_parent.join(path.file_name()?);
    Some(to_slash(&joined))
}

fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
