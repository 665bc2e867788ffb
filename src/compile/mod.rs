//! Stylesheet compilation.
//!
//! The primary entry (`skin.css`) and its variants (`skin-*.css`) each run
//! through these stages, in order:
//!
//! 1. [`ImportBeautifier`] - one normalized `@import` per line
//! 2. [`ImportResolver`] - inline local imports
//! 3. [`Autoprefixer`] - vendor prefixes for the configured browsers
//! 4. [`MarkerStrip::template_path`] - drop extraction headers
//! 5. [`MarkerStrip::empty_placeholder`] - drop empty-template placeholders
//! 6. [`BannerStage`] - prepend the rendered banner
//! 7. [`Rename`] - `skin-dark.css` → `style-dark.css`
//! 8. [`TrimTrailing`] - no trailing whitespace, single final newline
//!
//! Outputs are written to the build directory, overwriting earlier builds.

mod beautify;
mod imports;
mod markers;
mod prefix;
mod rename;
mod trim;

pub use beautify::ImportBeautifier;
pub use imports::ImportResolver;
pub use markers::MarkerStrip;
pub use prefix::Autoprefixer;
pub use rename::Rename;
pub use trim::TrimTrailing;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::CompileOptions;
use crate::pipeline::{Pipeline, SourceFile, Transform, discover};
use crate::templating::Banner;

/// Prepends an already rendered banner.
#[derive(Debug, Clone)]
pub struct BannerStage {
    rendered: String,
}

impl BannerStage {
    pub fn new(rendered: impl Into<String>) -> Self {
        Self {
            rendered: rendered.into(),
        }
    }
}

impl Transform for BannerStage {
    fn name(&self) -> &'static str {
        "banner"
    }

    fn apply(&self, mut file: SourceFile) -> Result<SourceFile> {
        file.contents.insert_str(0, &self.rendered);
        Ok(file)
    }
}

/// Builds the compile pipeline with an already rendered banner.
pub fn pipeline_with_banner(
    options: &CompileOptions,
    project_root: &Path,
    banner: String,
) -> Result<Pipeline> {
    Ok(Pipeline::new("skin-compile", options.sources.clone(), &options.dest)
        .stage(ImportBeautifier)
        .stage(ImportResolver::new(project_root, &options.packages_dir, options.src_ext.clone()))
        .stage(Autoprefixer::new(&options.browsers)?)
        .stage(MarkerStrip::template_path()?)
        .stage(MarkerStrip::empty_placeholder()?)
        .stage(BannerStage::new(banner))
        .stage(Rename::new(
            options.src_name.clone(),
            options.build_name.clone(),
            options.build_ext.clone(),
        ))
        .stage(TrimTrailing)
        .concurrency(options.concurrency))
}

/// Builds the compile pipeline, loading and rendering the banner.
pub fn pipeline(options: &CompileOptions, project_root: &Path) -> Result<Pipeline> {
    let banner = Banner::load(&options.banner_file, &options.banner_data_file, &options.package_file)?
        .render()?;
    pipeline_with_banner(options, project_root, banner)
}

/// Runs the compile action and returns the written stylesheets.
///
/// Without any entry file this is a no-op and the banner files are not read.
pub async fn run(options: &CompileOptions, project_root: &Path) -> Result<Vec<PathBuf>> {
    if discover(&options.sources).await?.is_empty() {
        tracing::debug!("No stylesheets to compile in {}", options.sources.base().display());
        return Ok(Vec::new());
    }

    let pipeline = pipeline(options, project_root).context("Failed to prepare skin compilation")?;
    let written = pipeline.run().await?;
    tracing::info!("Compiled {} stylesheet(s) into {}", written.len(), options.dest.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SkinConfig, SkinOptions};
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[tokio::test]
    async fn test_compile_entry_and_variant() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "src/skin/skin.css", "@import \"base\";\n.main { color: red; }\n");
        write(root, "src/skin/skin-dark.css", ".dark { color: black; }\n");
        write(root, "src/skin/_base.css", ".base { margin: 0; }\n");
        write(root, "src/skin/other.css", ".other {}\n");

        let options = SkinOptions::resolve(&SkinConfig::default(), root).unwrap();
        let pipeline = pipeline_with_banner(&options.compile, root, "/*! banner */\n\n".to_string()).unwrap();
        let written = pipeline.run().await.unwrap();

        assert_eq!(written, vec![root.join("dist/style-dark.css"), root.join("dist/style.css")]);

        let main = std::fs::read_to_string(root.join("dist/style.css")).unwrap();
        assert!(main.starts_with("/*! banner */\n\n"), "{main}");
        assert!(main.find(".base").unwrap() < main.find(".main").unwrap());
        assert!(main.ends_with("}\n") && !main.ends_with("\n\n"));

        let dark = std::fs::read_to_string(root.join("dist/style-dark.css")).unwrap();
        assert!(dark.contains(".dark"));
    }

    #[tokio::test]
    async fn test_missing_banner_fails_before_writing() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "src/skin/skin.css", ".a { color: red; }\n");

        let options = SkinOptions::resolve(&SkinConfig::default(), root).unwrap();
        assert!(run(&options.compile, root).await.is_err());
        assert!(!root.join("dist").exists());
    }

    #[test]
    fn test_stage_order() {
        let options = SkinOptions::resolve(&SkinConfig::default(), Path::new("/p")).unwrap();
        let pipeline = pipeline_with_banner(&options.compile, Path::new("/p"), String::new()).unwrap();
        assert_eq!(
            pipeline.stage_names(),
            vec![
                "import-beautifier",
                "import-resolver",
                "autoprefixer",
                "strip-template-path",
                "strip-empty-placeholder",
                "banner",
                "rename",
                "trim"
            ]
        );
    }
}
