//! Util holds the one piece of path arithmetic shared by the Scoper and the Path Defaulter: the
//! "strip a trailing `functions/` segment" rule from the function-config's directory.

use std::path::{Path, PathBuf};

/// Scope_dir computes a function config's scope directory from its `path` annotation value, or
/// `None` if the function config carries no path annotation at all (meaning global scope).
///
/// Functions that live under a conventional `functions/` subdirectory scope to the *parent* of
/// that subdirectory, applied exactly once to the last path segment.
pub fn scope_dir(function_config_path: Option<&str>) -> Option<String> {
    let p = function_config_path?;
    let dir = Path::new(p).parent().unwrap_or_else(|| Path::new(""));
    let dir = strip_trailing_functions(dir);
    Some(path_to_scope_string(&dir))
}

fn strip_trailing_functions(dir: &Path) -> PathBuf {
    match dir.file_name() {
        Some(name) if name == "functions" => dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("")),
        _ => dir.to_path_buf(),
    }
}

fn path_to_scope_string(dir: &Path) -> String {
    dir.to_string_lossy().replace('\\', "/")
}

/// Is_in_scope reports whether a candidate document's path directory is the scope directory, or
/// a descendant of it. `scope` of `""` (root) matches every directory.
pub fn is_in_scope(scope: &str, candidate_path: &str) -> bool {
    let dir = Path::new(candidate_path)
        .parent()
        .map(|p| path_to_scope_string(p))
        .unwrap_or_default();
    if scope.is_empty() {
        return true;
    }
    dir == scope || dir.starts_with(&format!("{scope}/"))
}
