//! Relative path computation inside an export tree.
//!
//! All paths handled here are relative to the export root. Nothing touches
//! the filesystem.

use std::path::{Component, Path, PathBuf};

/// Path that walks from `anchor` (a directory inside the export) up to the
/// export root.
///
/// # Example
/// ```ignore
/// assert_eq!(to_root(Path::new("notes/daily")), PathBuf::from("../.."));
/// assert_eq!(to_root(Path::new("")), PathBuf::new());
/// ```
pub fn to_root(anchor: &Path) -> PathBuf {
    let depth = normalized(anchor).len();
    (0..depth).map(|_| Component::ParentDir).collect()
}

/// Relative path from directory `from_dir` to `target`, both export-relative.
pub fn relative_between(from_dir: &Path, target: &Path) -> PathBuf {
    let from = normalized(from_dir);
    let to = normalized(target);

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common..from.len() {
        result.push("..");
    }
    for part in &to[common..] {
        result.push(part);
    }
    result
}

/// Render a path with forward slashes regardless of platform.
pub fn to_unix_style(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Resolve `.` and `..` lexically and drop root/prefix components.
///
/// `..` above the root is discarded.
fn normalized(path: &Path) -> Vec<String> {
    let unix = to_unix_style(path);
    let mut parts: Vec<String> = Vec::new();
    for component in Path::new(&unix).components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => {
                parts.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts
}
