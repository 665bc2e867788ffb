//! Skin extraction from XML templates.
//!
//! Templates embed their styles inline between a start tag and an end tag
//! (`<b:skin>` … `</b:skin>` by default). Extraction copies every such region
//! into a stylesheet that mirrors the template's path under the extract
//! directory, so the stylesheets can be `@import`ed by the skin sources.
//!
//! Each region is preceded by a header naming the template it came from:
//!
//! ```text
//! /*
//! // ------------------------------------------------------------------------
//! // Template path: src/layouts/post.xml
//! // ------------------------------------------------------------------------
//! */
//! .post { color: red; }
//! ```
//!
//! A template without any region produces exactly [`EMPTY_MESSAGE`]. The
//! compile step strips both markers again.

mod scanner;

pub use scanner::TagScanner;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::ExtractOptions;
use crate::pipeline::{Pipeline, SourceFile, Transform};
use crate::utils::fs::to_slash;

/// Placeholder written for templates without any style region.
pub const EMPTY_MESSAGE: &str = "/* Skin-in-Template is empty */";

/// Placeholder in [`HEADER_TEMPLATE`] replaced by the template path.
pub const FILEPATH_PLACEHOLDER: &str = "<filepath>";

/// Header written before every extracted region.
pub const HEADER_TEMPLATE: &str = "/*
// ------------------------------------------------------------------------
// Template path: <filepath>
// ------------------------------------------------------------------------
*/";

/// Footer appended after the last region.
pub const FOOTER: &str = "";

/// Pipeline stage turning a template into its extracted stylesheet.
#[derive(Debug, Clone)]
pub struct Extractor {
    scanner: TagScanner,
    project_root: PathBuf,
    extname: String,
}

impl Extractor {
    /// Creates an extractor for the given tag tokens.
    pub fn new(
        tag_start: &str,
        tag_end: &str,
        project_root: impl Into<PathBuf>,
        extname: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            scanner: TagScanner::new(tag_start, tag_end)?,
            project_root: project_root.into(),
            extname: extname.into(),
        })
    }

    /// Builds the extracted stylesheet for a template.
    ///
    /// `template_path` is written into each header; it should be relative to
    /// the project root.
    pub fn extract(&self, contents: &str, template_path: &str) -> String {
        let regions = self.scanner.regions(contents);
        if regions.is_empty() {
            return EMPTY_MESSAGE.to_string();
        }

        let header = HEADER_TEMPLATE.replace(FILEPATH_PLACEHOLDER, template_path);
        let body = regions
            .iter()
            .map(|region| format!("{header}\n{region}"))
            .collect::<Vec<_>>()
            .join("\n\n");
        format!("{body}{FOOTER}")
    }

    fn display_path(&self, path: &Path) -> String {
        match path.strip_prefix(&self.project_root) {
            Ok(relative) => to_slash(relative),
            Err(_) => to_slash(path),
        }
    }
}

impl Transform for Extractor {
    fn name(&self) -> &'static str {
        "extract"
    }

    fn apply(&self, mut file: SourceFile) -> Result<SourceFile> {
        let template_path = self.display_path(file.path());
        file.contents = self.extract(&file.contents, &template_path);
        file.set_extension(&self.extname);
        Ok(file)
    }
}

/// Builds the extract pipeline for one template scan.
pub fn pipeline(name: &str, options: &ExtractOptions, project_root: &Path) -> Result<Pipeline> {
    let extractor =
        Extractor::new(&options.tag_start, &options.tag_end, project_root, options.extname.clone())?;
    Ok(Pipeline::new(name, options.sources.clone(), &options.dest)
        .stage(extractor)
        .concurrency(options.concurrency))
}

/// Runs one template scan and returns the extracted files.
///
/// Extracted files of templates that no longer exist are left in place.
pub async fn run(name: &str, options: &ExtractOptions, project_root: &Path) -> Result<Vec<PathBuf>> {
    let written = pipeline(name, options, project_root)?.run().await?;
    tracing::info!("Extracted {} skin file(s) into {}", written.len(), options.dest.display());
    Ok(written)
}
