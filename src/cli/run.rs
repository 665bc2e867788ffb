//! Run a registered task.

use anyhow::Result;
use clap::Args;

use crate::tasks::{SKIN_TASKS, TaskRunner};

/// Run a task, `skin-tasks` by default.
#[derive(Debug, Args)]
pub struct RunCommand {
    /// Task name, see `skinpack list`
    #[arg(default_value = SKIN_TASKS)]
    pub task: String,
}

impl RunCommand {
    pub async fn execute(self, runner: &TaskRunner) -> Result<()> {
        runner.run(&self.task).await
    }
}
