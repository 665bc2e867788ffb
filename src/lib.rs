//! skinpack - skin build pipeline
//!
//! Builds a site theme ("skin") from styles embedded in markup templates:
//!
//! 1. **Extract** - pull every `<b:skin>` region out of the template documents
//!    into one stylesheet per template, mirroring the template tree.
//! 2. **Extract plugins** - the same for templates shipped in installed
//!    packages.
//! 3. **Lint** - check the stylesheet sources against a rule configuration;
//!    error-level findings stop the build.
//! 4. **Compile** - inline `@import`s, add vendor prefixes, drop extraction
//!    markers, prepend a rendered banner and write the renamed outputs.
//!
//! The four steps are registered as named tasks (plus the `skin-tasks`
//! composite) in a [`tasks::TaskRunner`], and exposed by the `skinpack`
//! binary.
//!
//! # Modules
//!
//! - [`cli`] - command-line interface
//! - [`config`] - `skinpack.toml` and the resolved per-action options
//! - [`core`] - error types and user-facing error rendering
//! - [`pattern`] - glob based file discovery
//! - [`pipeline`] - per-file transform pipeline engine
//! - [`extract`] - embedded style extraction
//! - [`lint`] - stylesheet linter and report
//! - [`compile`] - stylesheet compilation stages
//! - [`templating`] - banner rendering
//! - [`tasks`] - task registry and the skin task set
//! - [`utils`] - file system, progress and text helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use skinpack::config::SkinConfig;
//! use skinpack::tasks::{Registrar, SkinRegistry, TaskRunner, SKIN_TASKS};
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let root = Path::new(".");
//! let config = SkinConfig::load_for_project(root, None).await?;
//!
//! let mut runner = TaskRunner::new();
//! SkinRegistry::new(&config, root)?.init(&mut runner)?;
//! runner.run(SKIN_TASKS).await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod compile;
pub mod config;
pub mod core;
pub mod extract;
pub mod lint;
pub mod pattern;
pub mod pipeline;
pub mod tasks;
pub mod templating;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
