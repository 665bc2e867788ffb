//! Task registration for the skin pipeline.
//!
//! [`SkinRegistry`] registers the four skin actions and the composite
//! series into a [`TaskRunner`]:
//!
//! | Task | Action |
//! |---|---|
//! | `skin-extract` | extract skins from the project templates |
//! | `skin-extract-plugins` | extract skins from installed package templates |
//! | `skin-lint` | lint the skin sources |
//! | `skin-compile` | compile the entry stylesheets into the build directory |
//! | `skin-tasks` | all of the above, in that order |
//!
//! # Examples
//!
//! ```rust,no_run
//! use skinpack::config::SkinConfig;
//! use skinpack::tasks::{Registrar, SkinRegistry, TaskRunner, SKIN_TASKS};
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let registry = SkinRegistry::new(&SkinConfig::default(), Path::new("."))?;
//! let mut runner = TaskRunner::new();
//! registry.init(&mut runner)?;
//! runner.run(SKIN_TASKS).await?;
//! # Ok(())
//! # }
//! ```

mod runner;

pub use runner::{Task, TaskFn, TaskRunner, format_elapsed};

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::config::{SkinConfig, SkinOptions};
use crate::{compile, extract, lint};

pub const SKIN_EXTRACT: &str = "skin-extract";
pub const SKIN_EXTRACT_PLUGINS: &str = "skin-extract-plugins";
pub const SKIN_LINT: &str = "skin-lint";
pub const SKIN_COMPILE: &str = "skin-compile";
pub const SKIN_TASKS: &str = "skin-tasks";

/// Something that registers tasks into a runner.
pub trait Registrar {
    fn init(&self, runner: &mut TaskRunner) -> Result<()>;
}

/// Registers the skin pipeline tasks.
///
/// The configuration is resolved once, on construction. Registration only
/// records closures; nothing touches the file system until a task runs.
#[derive(Debug, Clone)]
pub struct SkinRegistry {
    options: Arc<SkinOptions>,
}

impl SkinRegistry {
    /// Resolves `config` against `project_root`.
    pub fn new(config: &SkinConfig, project_root: &Path) -> Result<Self> {
        Ok(Self {
            options: Arc::new(SkinOptions::resolve(config, project_root)?),
        })
    }

    /// The resolved options shared by every registered task.
    pub fn options(&self) -> Arc<SkinOptions> {
        Arc::clone(&self.options)
    }
}

impl Registrar for SkinRegistry {
    fn init(&self, runner: &mut TaskRunner) -> Result<()> {
        let options = self.options();
        runner.action(SKIN_EXTRACT, move || {
            let options = Arc::clone(&options);
            async move {
                let o = &*options;
                extract::run(SKIN_EXTRACT, &o.extract, &o.project_root).await?;
                Ok(())
            }
        })?;

        let options = self.options();
        runner.action(SKIN_EXTRACT_PLUGINS, move || {
            let options = Arc::clone(&options);
            async move {
                let o = &*options;
                extract::run(SKIN_EXTRACT_PLUGINS, &o.extract_plugins, &o.project_root).await?;
                Ok(())
            }
        })?;

        let options = self.options();
        runner.action(SKIN_LINT, move || {
            let options = Arc::clone(&options);
            async move {
                lint::run(&options.lint, &options.project_root).await?;
                Ok(())
            }
        })?;

        let options = self.options();
        runner.action(SKIN_COMPILE, move || {
            let options = Arc::clone(&options);
            async move {
                compile::run(&options.compile, &options.project_root).await?;
                Ok(())
            }
        })?;

        runner.series(SKIN_TASKS, &[SKIN_EXTRACT, SKIN_EXTRACT_PLUGINS, SKIN_LINT, SKIN_COMPILE])
    }
}
