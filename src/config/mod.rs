//! Configuration management for skinpack
//!
//! Configuration lives in two layers:
//!
//! 1. [`SkinConfig`] - the `skinpack.toml` file as written, with relative
//!    paths and serde defaults for every key
//! 2. [`SkinOptions`] - the same values resolved against the project root
//!    and grouped per action, shared read-only by the registered tasks
//!
//! # Examples
//!
//! ```rust,no_run
//! use skinpack::config::{SkinConfig, SkinOptions};
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let root = Path::new("/path/to/theme");
//! let config = SkinConfig::load_for_project(root, None).await?;
//! let options = SkinOptions::resolve(&config, root)?;
//! println!("compiling into {}", options.compile.dest.display());
//! # Ok(())
//! # }
//! ```

mod options;
mod skin;

pub use options::{CompileOptions, ExtractOptions, LintOptions, PLUGINS_SUBDIR, SkinOptions};
pub use skin::{
    BuildSection, CONFIG_FILE_NAME, CompileSection, ExtractSection, FilesSection, PipelineSection,
    SkinConfig, SourceSection, TagSection,
};
