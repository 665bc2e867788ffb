//! The per-file record flowing through the stages.

use std::path::{Path, PathBuf};

use crate::core::FileOps;

/// A stylesheet or template held in memory between stages.
///
/// `path` is absolute. `base` is the directory the file was matched from;
/// the output is written to `dest / relative_path()`, so renaming the file
/// only ever changes the last path component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    path: PathBuf,
    base: PathBuf,
    /// UTF-8 contents
    pub contents: String,
}

impl SourceFile {
    /// Creates a record from in-memory contents.
    pub fn new(path: impl Into<PathBuf>, base: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            base: base.into(),
            contents: contents.into(),
        }
    }

    /// Reads `path` from disk. Must be called from a blocking context.
    pub fn read(path: &Path, base: &Path) -> anyhow::Result<Self> {
        let contents = FileOps::read_blocking(path, "reading pipeline source")?;
        Ok(Self::new(path, base, contents))
    }

    /// Absolute (possibly renamed) path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Glob base directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Path relative to the glob base; the file name alone when the path is
    /// not under the base.
    pub fn relative_path(&self) -> PathBuf {
        match self.path.strip_prefix(&self.base) {
            Ok(relative) => relative.to_path_buf(),
            Err(_) => self.path.file_name().map(PathBuf::from).unwrap_or_default(),
        }
    }

    /// File name without its extension.
    pub fn stem(&self) -> String {
        self.path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
    }

    /// Replaces the extension. `ext` may be given with or without the dot.
    pub fn set_extension(&mut self, ext: &str) {
        self.path.set_extension(ext.trim_start_matches('.'));
    }

    /// Replaces the file name, keeping the directory.
    pub fn set_file_name(&mut self, name: &str) {
        self.path.set_file_name(name);
    }
}
