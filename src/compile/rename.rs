//! Output file naming.

use anyhow::Result;

use crate::pipeline::{SourceFile, Transform};

/// Maps source basenames to build basenames.
///
/// With `skin` → `style`, `skin-dark.css` becomes `style-dark.css` and
/// `skin.css` becomes `style.css`. The variant prefix is replaced first,
/// then the first remaining occurrence of the source basename.
/// The build extension is always applied.
#[derive(Debug, Clone)]
pub struct Rename {
    src_name: String,
    build_name: String,
    build_ext: String,
}

impl Rename {
    pub fn new(
        src_name: impl Into<String>,
        build_name: impl Into<String>,
        build_ext: impl Into<String>,
    ) -> Self {
        Self {
            src_name: src_name.into(),
            build_name: build_name.into(),
            build_ext: build_ext.into(),
        }
    }

    /// Renames a basename (no extension).
    pub fn basename(&self, stem: &str) -> String {
        let src_variant = format!("{}-", self.src_name);
        let build_variant = format!("{}-", self.build_name);
        stem.replacen(&src_variant, &build_variant, 1).replacen(&self.src_name, &self.build_name, 1)
    }

    /// Renames a full file name, replacing its extension.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}{}", self.basename(stem), self.build_ext)
    }
}

impl Transform for Rename {
    fn name(&self) -> &'static str {
        "rename"
    }

    fn apply(&self, mut file: SourceFile) -> Result<SourceFile> {
        let name = self.file_name(&file.stem());
        tracing::trace!("Renaming {} -> {name}", file.path().display());
        file.set_file_name(&name);
        Ok(file)
    }
}
