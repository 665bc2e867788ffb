//! Command-line interface for skinpack.
//!
//! # Commands
//!
//! - `run [TASK]` - run a registered task, `skin-tasks` by default
//! - `list` - print the registered task names
//! - `init` - write a default `skinpack.toml`
//!
//! # Global Options
//!
//! - `--verbose` - enable debug output
//! - `--quiet` - suppress everything except errors
//! - `--project-dir` - project root, defaults to the working directory
//! - `--config` - configuration file, defaults to `<project>/skinpack.toml`
//! - `--no-progress` - disable spinners
//!
//! ```bash
//! skinpack init
//! skinpack run
//! skinpack --verbose run skin-compile
//! skinpack -C site --no-progress run skin-lint
//! ```

mod init;
mod list;
mod run;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::SkinConfig;
use crate::tasks::{Registrar, SkinRegistry, TaskRunner};
use crate::utils::progress::is_progress_disabled;

pub use init::InitCommand;
pub use list::ListCommand;
pub use run::RunCommand;

/// Settings derived from the global flags.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is not set
    pub log_level: String,
    /// Disable spinners
    pub no_progress: bool,
}

impl CliConfig {
    /// Installs the global tracing subscriber.
    ///
    /// `RUST_LOG` wins over the flag-derived level. Logs go to stderr so
    /// that command output on stdout stays clean.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(&self.log_level)
        };

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init();
    }
}

/// Skin build pipeline: extract, lint and compile template-embedded stylesheets.
#[derive(Debug, Parser)]
#[command(name = "skinpack", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Project root; relative configuration paths resolve against it
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    project_dir: Option<PathBuf>,

    /// Configuration file [default: <project>/skinpack.toml]
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Disable progress spinners
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a task
    Run(RunCommand),
    /// List the registered tasks
    List(ListCommand),
    /// Write a default skinpack.toml
    Init(InitCommand),
}

impl Cli {
    /// Settings derived from the global flags.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: log_level.to_string(),
            no_progress: self.no_progress,
        }
    }

    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        let project_root = match &self.project_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir().context("Failed to determine the working directory")?,
        };

        match self.command {
            Commands::Init(cmd) => cmd.execute(&project_root).await,
            Commands::List(cmd) => {
                let runner = build_runner(&project_root, self.config.as_deref(), &config).await?;
                cmd.execute(&runner)
            }
            Commands::Run(cmd) => {
                let runner = build_runner(&project_root, self.config.as_deref(), &config).await?;
                cmd.execute(&runner).await
            }
        }
    }
}

/// Loads the configuration and registers the skin tasks.
async fn build_runner(
    project_root: &Path,
    config_path: Option<&Path>,
    cli_config: &CliConfig,
) -> Result<TaskRunner> {
    let skin_config = SkinConfig::load_for_project(project_root, config_path).await?;
    let registry = SkinRegistry::new(&skin_config, project_root)?;

    let mut runner =
        TaskRunner::new().with_progress(!cli_config.no_progress && !is_progress_disabled());
    registry.init(&mut runner)?;
    Ok(runner)
}
