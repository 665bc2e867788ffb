//! Removal of the comments inserted by extraction.

use anyhow::{Context, Result};
use regex::Regex;

use crate::pipeline::{SourceFile, Transform};

/// Removes every occurrence of a marker comment.
///
/// Each marker is removed in three passes: followed by a blank line,
/// followed by a single newline, then bare. Running the passes in that
/// order leaves no gap where the marker was.
#[derive(Debug, Clone)]
pub struct MarkerStrip {
    name: &'static str,
    passes: [Regex; 3],
}

impl MarkerStrip {
    fn from_comment_pattern(name: &'static str, comment: &str) -> Result<Self> {
        let pass = |suffix: &str| {
            Regex::new(&format!("{comment}{suffix}"))
                .with_context(|| format!("Invalid marker pattern for {name}"))
        };
        Ok(Self {
            name,
            passes: [pass(r"\n\n")?, pass(r"\n")?, pass("")?],
        })
    }

    /// Strips the `Template path:` header comments.
    pub fn template_path() -> Result<Self> {
        Self::from_comment_pattern("strip-template-path", r"/\*[^*]*Template\spath:[^*]*\*/")
    }

    /// Strips the empty-template placeholder.
    pub fn empty_placeholder() -> Result<Self> {
        Self::from_comment_pattern(
            "strip-empty-placeholder",
            &regex::escape(crate::extract::EMPTY_MESSAGE),
        )
    }

    /// Applies the three passes.
    pub fn strip(&self, text: &str) -> String {
        self.passes
            .iter()
            .fold(text.to_string(), |acc, pass| pass.replace_all(&acc, "").into_owned())
    }
}

impl Transform for MarkerStrip {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, mut file: SourceFile) -> Result<SourceFile> {
        file.contents = self.strip(&file.contents);
        Ok(file)
    }
}
