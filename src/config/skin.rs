//! The `skinpack.toml` configuration file.
//!
//! Every section and key is optional; missing values fall back to the
//! defaults below, so an empty file (or no file at all) is a valid
//! configuration.
//!
//! ```toml
//! [src]
//! dir = "src/skin"
//! filename = "skin.css"
//!
//! [build]
//! dir = "dist"
//! filename = "style.css"
//!
//! [extract]
//! root = "src"
//! dir = "src/skin/_extract"
//! extname = ".css"
//! packages_dir = "node_modules"
//! plugin_pattern = "**/*.skinpack.xml"
//!
//! [tag]
//! start = "b:skin"
//! end = "/b:skin"
//!
//! [files]
//! lint = ".stylelintrc.json"
//! banner = "src/config/banner.txt"
//! banner_data = "src/config/banner.json"
//! package = "package.json"
//!
//! [compile]
//! browsers = ["defaults"]
//!
//! [pipeline]
//! concurrency = 8     # unbounded when unset
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::{FileOps, SkinError};

/// Default configuration file name, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "skinpack.toml";

/// Stylesheet source location and primary entry file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSection {
    /// Stylesheet source root
    pub dir: PathBuf,
    /// Primary entry file name, e.g. `skin.css`
    pub filename: String,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("src/skin"),
            filename: "skin.css".to_string(),
        }
    }
}

/// Compiled output location and primary output file name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    /// Compiled output root
    pub dir: PathBuf,
    /// Primary output file name, e.g. `style.css`
    pub filename: String,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("dist"),
            filename: "style.css".to_string(),
        }
    }
}

/// Where templates are searched and where extracted skins are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractSection {
    /// Root under which template documents are searched
    pub root: PathBuf,
    /// Destination root for extracted stylesheets
    pub dir: PathBuf,
    /// Extension given to extracted files, with the leading dot
    pub extname: String,
    /// Installed-package directory; excluded from the project scan and
    /// searched by the plugin scan
    pub packages_dir: PathBuf,
    /// Pattern selecting plugin templates inside `packages_dir`
    pub plugin_pattern: String,
}

impl Default for ExtractSection {
    fn default() -> Self {
        Self {
            root: PathBuf::from("src"),
            dir: PathBuf::from("src/skin/_extract"),
            extname: ".css".to_string(),
            packages_dir: PathBuf::from("node_modules"),
            plugin_pattern: "**/*.skinpack.xml".to_string(),
        }
    }
}

/// Delimiter tokens of the embedded style region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagSection {
    /// Start tag name, e.g. `b:skin`
    pub start: String,
    /// End tag name, e.g. `/b:skin`
    pub end: String,
}

impl Default for TagSection {
    fn default() -> Self {
        Self {
            start: "b:skin".to_string(),
            end: "/b:skin".to_string(),
        }
    }
}

/// Auxiliary files consumed by the lint and compile steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesSection {
    /// Linter rule configuration (stylelint JSON format)
    pub lint: PathBuf,
    /// Banner template text
    pub banner: PathBuf,
    /// JSON data exposed to the banner as `data`
    pub banner_data: PathBuf,
    /// Project package metadata exposed to the banner as `pkg`
    pub package: PathBuf,
}

impl Default for FilesSection {
    fn default() -> Self {
        Self {
            lint: PathBuf::from(".stylelintrc.json"),
            banner: PathBuf::from("src/config/banner.txt"),
            banner_data: PathBuf::from("src/config/banner.json"),
            package: PathBuf::from("package.json"),
        }
    }
}

/// Compile step tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileSection {
    /// Browserslist queries deciding which vendor prefixes are added
    pub browsers: Vec<String>,
}

impl Default for CompileSection {
    fn default() -> Self {
        Self {
            browsers: vec!["defaults".to_string()],
        }
    }
}

/// File pipeline tuning shared by the extract and compile actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSection {
    /// Maximum number of files processed at once; unbounded when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency: Option<usize>,
}

/// Complete skin pipeline configuration as written in `skinpack.toml`.
///
/// Paths are kept exactly as written; [`super::SkinOptions::resolve`] turns
/// them into absolute paths against the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinConfig {
    /// `[src]`
    pub src: SourceSection,
    /// `[build]`
    pub build: BuildSection,
    /// `[extract]`
    pub extract: ExtractSection,
    /// `[tag]`
    pub tag: TagSection,
    /// `[files]`
    pub files: FilesSection,
    /// `[compile]`
    pub compile: CompileSection,
    /// `[pipeline]`
    pub pipeline: PipelineSection,
}

impl SkinConfig {
    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// fails [`SkinConfig::validate`].
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = FileOps::read_with_context(path, "loading skinpack configuration").await?;

        let config: Self = toml::from_str(&content).map_err(|e| SkinError::ConfigParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load configuration for a project.
    ///
    /// An explicit `path` must exist. Without one, `<project_root>/skinpack.toml`
    /// is used when present and the built-in defaults otherwise.
    pub async fn load_for_project(project_root: &Path, path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let path =
                    if path.is_absolute() { path.to_path_buf() } else { project_root.join(path) };
                if !path.exists() {
                    return Err(SkinError::ConfigError {
                        message: format!("config file {} does not exist", path.display()),
                    }
                    .into());
                }
                Self::load_from(&path).await
            }
            None => {
                let default_path = project_root.join(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::load_from(&default_path).await
                } else {
                    tracing::debug!("No {CONFIG_FILE_NAME} found, using built-in defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Check values that would make the pipeline meaningless.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("src.filename", self.src.filename.as_str()),
            ("build.filename", self.build.filename.as_str()),
            ("tag.start", self.tag.start.as_str()),
            ("tag.end", self.tag.end.as_str()),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(SkinError::ConfigError {
                    message: format!("'{key}' must not be empty"),
                }
                .into());
            }
        }

        if !self.extract.extname.is_empty() && !self.extract.extname.starts_with('.') {
            return Err(SkinError::ConfigError {
                message: format!(
                    "'extract.extname' must start with a dot, got '{}'",
                    self.extract.extname
                ),
            }
            .into());
        }

        if self.pipeline.concurrency == Some(0) {
            return Err(SkinError::ConfigError {
                message: "'pipeline.concurrency' must be at least 1".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Render the default configuration as commented TOML for `skinpack init`.
    pub fn init_example() -> Result<String> {
        let body = toml::to_string_pretty(&Self::default())
            .context("Failed to serialize default configuration")?;
        Ok(format!("# skinpack configuration; every key is optional\n\n{body}"))
    }
}
