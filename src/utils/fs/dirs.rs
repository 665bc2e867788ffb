//! Directory creation helpers.

use crate::core::{FileOperation, FileResultExt};
use anyhow::Result;
use std::fs;
use std::path::Path;

/// Ensures a directory exists, creating it and its parents if necessary.
///
/// # Errors
///
/// Fails when the directory cannot be created or when `path` exists but is
/// not a directory.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path).with_file_context(
            FileOperation::CreateDir,
            path,
            "creating output directory",
        )?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Ensures that the parent directory of a file path exists.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a/b/c");

        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
        ensure_dir(&dir).unwrap();
    }

    #[test]
    fn test_ensure_dir_rejects_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.css");
        std::fs::write(&file, "").unwrap();

        assert!(ensure_dir(&file).is_err());
    }
}
