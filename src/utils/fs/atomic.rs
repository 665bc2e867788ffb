//! Atomic file write operations using a temp-and-rename strategy.
//!
//! Readers (and a concurrent run of the same task) never observe a partially
//! written stylesheet; the last completed write wins.

use crate::core::{FileOperation, FileResultExt};
use crate::utils::fs::dirs::ensure_parent_dir;
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Safely writes a string to a file using atomic operations.
///
/// Convenience wrapper around [`atomic_write`].
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Atomically writes bytes to a file.
///
/// The content is written to a temporary file in the destination directory,
/// synced, and then renamed over `path`. Parent directories are created as
/// needed.
///
/// # Examples
///
/// ```rust,no_run
/// use skinpack::utils::fs::atomic_write;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// atomic_write(Path::new("dist/style.css"), b".a{color:red}\n")?;
/// # Ok(())
/// # }
/// ```
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    ensure_parent_dir(path)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(dir).with_file_context(
        FileOperation::Write,
        dir,
        "creating temporary file",
    )?;
    temp.write_all(content).with_file_context(FileOperation::Write, temp.path(), "writing temporary file")?;
    temp.as_file().sync_all().with_file_context(FileOperation::Write, temp.path(), "syncing temporary file")?;

    temp.persist(path)
        .map_err(|e| e.error)
        .with_file_context(FileOperation::Write, path, "replacing destination file")?;

    Ok(())
}
