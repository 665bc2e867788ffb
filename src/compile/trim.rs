//! Trailing whitespace normalization.

use anyhow::Result;

use crate::pipeline::{SourceFile, Transform};

/// Trims trailing whitespace from every line and ends the text with exactly
/// one newline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrimTrailing;

impl TrimTrailing {
    pub fn trim(text: &str) -> String {
        let mut out: String = text.lines().map(str::trim_end).collect::<Vec<_>>().join("\n");
        let len = out.trim_end_matches('\n').len();
        out.truncate(len);
        out.push('\n');
        out
    }
}

impl Transform for TrimTrailing {
    fn name(&self) -> &'static str {
        "trim"
    }

    fn apply(&self, mut file: SourceFile) -> Result<SourceFile> {
        file.contents = Self::trim(&file.contents);
        Ok(file)
    }
}
