//! Banner templating.
//!
//! The compiled stylesheet starts with a banner comment rendered from a text
//! template with [Tera](https://keats.github.io/tera/). Two values are
//! available to the template:
//!
//! - `data` - the contents of the banner data JSON file
//! - `pkg` - the contents of the project package metadata (`package.json`)
//!
//! ```text
//! /*!
//!  * {{ pkg.name }} v{{ pkg.version }}
//!  * {{ data.copyright }}
//!  */
//! ```
//!
//! Before rendering, the common leading indentation is removed from the
//! template text, which is then trimmed and followed by a blank line. The
//! banner is always separated from the stylesheet body by one empty line.

mod error;
mod renderer;

pub use error::{ErrorLocation, TemplateError};
pub use renderer::TemplateRenderer;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tera::Context as TeraContext;

use crate::core::SkinError;
use crate::utils::fs::{read_json_file, read_text_file};
use crate::utils::text::strip_indent;

/// A banner template together with the data it is rendered with.
#[derive(Debug, Clone)]
pub struct Banner {
    text: String,
    data: serde_json::Value,
    pkg: serde_json::Value,
    source: Option<PathBuf>,
}

impl Banner {
    /// Builds a banner from in-memory parts.
    pub fn new(text: &str, data: serde_json::Value, pkg: serde_json::Value) -> Self {
        Self {
            text: Self::prepare(text),
            data,
            pkg,
            source: None,
        }
    }

    /// Loads the banner template, the banner data and the package metadata.
    ///
    /// # Errors
    ///
    /// A missing file is a [`SkinError::BannerError`]; malformed JSON is a
    /// [`SkinError::ConfigParseError`] naming the file.
    pub fn load(template_file: &Path, data_file: &Path, package_file: &Path) -> Result<Self> {
        let text = read_required(template_file, "banner template")?;

        require_exists(data_file, "banner data")?;
        let data: serde_json::Value = read_json_file(data_file)
            .with_context(|| format!("Failed to load banner data from {}", data_file.display()))?;

        require_exists(package_file, "package metadata")?;
        let pkg: serde_json::Value = read_json_file(package_file).with_context(|| {
            format!("Failed to load package metadata from {}", package_file.display())
        })?;

        tracing::debug!("Loaded banner template from {}", template_file.display());
        Ok(Self {
            text: Self::prepare(&text),
            data,
            pkg,
            source: Some(template_file.to_path_buf()),
        })
    }

    fn prepare(text: &str) -> String {
        format!("{}\n\n", strip_indent(text).trim())
    }

    /// The template text after trimming and indent removal.
    pub fn template(&self) -> &str {
        &self.text
    }

    /// Renders the banner.
    pub fn render(&self) -> Result<String> {
        let mut context = TeraContext::new();
        context.insert("data", &self.data);
        context.insert("pkg", &self.pkg);

        let rendered = TemplateRenderer::new(self.source.as_deref())
            .render(&self.text, &context)
            .context("Failed to render banner")?;
        Ok(rendered)
    }
}

fn require_exists(path: &Path, what: &str) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(SkinError::BannerError {
            reason: format!("{what} file {} does not exist", path.display()),
        }
        .into())
    }
}

fn read_required(path: &Path, what: &str) -> Result<String> {
    require_exists(path, what)?;
    read_text_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_banner_prepare_and_render() {
        let banner = Banner::new(
            "\n    /*!\n     * {{ pkg.name }} {{ pkg.version }}\n     * {{ data.author }}\n     */\n\n",
            json!({"author": "Jane"}),
            json!({"name": "theme", "version": "2.0.0"}),
        );

        assert_eq!(banner.template(), "/*!\n * {{ pkg.name }} {{ pkg.version }}\n * {{ data.author }}\n */\n\n");
        assert_eq!(banner.render().unwrap(), "/*!\n * theme 2.0.0\n * Jane\n */\n\n");
    }

    #[test]
    fn test_load_missing_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        let err = Banner::load(&root.join("banner.txt"), &root.join("banner.json"), &root.join("package.json"))
            .unwrap_err();
        assert!(matches!(err.downcast_ref::<SkinError>(), Some(SkinError::BannerError { .. })));

        std::fs::write(root.join("banner.txt"), "/*! x */").unwrap();
        std::fs::write(root.join("banner.json"), "{}").unwrap();
        let err = Banner::load(&root.join("banner.txt"), &root.join("banner.json"), &root.join("package.json"))
            .unwrap_err();
        assert!(err.to_string().contains("package metadata"));
    }

    #[test]
    fn test_load_and_render_from_disk() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::fs::write(root.join("banner.txt"), "/*! {{ pkg.name }} */\n").unwrap();
        std::fs::write(root.join("banner.json"), "{}").unwrap();
        std::fs::write(root.join("package.json"), r#"{"name": "my-theme"}"#).unwrap();

        let banner =
            Banner::load(&root.join("banner.txt"), &root.join("banner.json"), &root.join("package.json")).unwrap();
        assert_eq!(banner.render().unwrap(), "/*! my-theme */\n\n");
    }

    #[test]
    fn test_render_error_is_template_error() {
        let banner = Banner::new("/*! {{ pkg.missing }} */", json!({}), json!({}));
        let err = banner.render().unwrap_err();
        assert!(err.downcast_ref::<TemplateError>().is_some());
    }
}
