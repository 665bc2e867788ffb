//! Lexical path helpers.

use std::path::{Component, Path, PathBuf};

/// Normalizes a path by resolving `.` and `..` components without touching
/// the file system.
///
/// # Examples
///
/// ```rust
/// use skinpack::utils::fs::normalize_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(normalize_path(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
/// ```
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                components.pop();
            }
            c => components.push(c),
        }
    }

    components.iter().collect()
}

/// Joins `path` onto `base` unless it is already absolute, then normalizes.
#[must_use]
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() { normalize_path(path) } else { normalize_path(&base.join(path)) }
}

/// Renders a path with `/` separators regardless of platform.
#[must_use]
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
