//! Print the registered tasks.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::tasks::{Task, TaskRunner};

#[derive(Debug, Args)]
pub struct ListCommand {}

impl ListCommand {
    pub fn execute(self, runner: &TaskRunner) -> Result<()> {
        for line in describe(runner) {
            println!("{line}");
        }
        Ok(())
    }
}

/// One line per task: the name, and the members of a series.
fn describe(runner: &TaskRunner) -> Vec<String> {
    runner
        .task_names()
        .into_iter()
        .map(|name| match runner.get(name) {
            Some(Task::Series(members)) => {
                format!("{}  {}", name.bold(), members.join(" → ").dimmed())
            }
            _ => name.bold().to_string(),
        })
        .collect()
}
