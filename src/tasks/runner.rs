//! Named task registry and executor.

use anyhow::{Context, Result};
use futures::future::{BoxFuture, FutureExt};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::core::SkinError;
use crate::utils::progress::ProgressBar;

/// Async task body.
pub type TaskFn = Arc<dyn Fn() -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// A registered task.
#[derive(Clone)]
pub enum Task {
    /// Runs a single action
    Action(TaskFn),
    /// Runs other tasks one at a time, stopping at the first failure
    Series(Vec<String>),
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Task::Action(_) => f.write_str("Action(..)"),
            Task::Series(names) => f.debug_tuple("Series").field(names).finish(),
        }
    }
}

/// Registers and runs named tasks.
///
/// # Examples
///
/// ```rust,no_run
/// use skinpack::tasks::TaskRunner;
///
/// # async fn example() -> anyhow::Result<()> {
/// let mut runner = TaskRunner::new();
/// runner.action("hello", || async {
///     println!("hello");
///     Ok(())
/// })?;
/// runner.series("default", &["hello"])?;
/// runner.run("default").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct TaskRunner {
    order: Vec<String>,
    tasks: HashMap<String, Task>,
    show_progress: bool,
}

impl TaskRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows a spinner while each action runs.
    #[must_use]
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Registers a task under `name`.
    ///
    /// # Errors
    ///
    /// [`SkinError::DuplicateTask`] if the name is taken and
    /// [`SkinError::TaskNotFound`] if a series member is not registered.
    pub fn register(&mut self, name: &str, task: Task) -> Result<()> {
        if self.tasks.contains_key(name) {
            return Err(SkinError::DuplicateTask {
                name: name.to_string(),
            }
            .into());
        }

        if let Task::Series(members) = &task {
            if let Some(missing) = members.iter().find(|m| !self.tasks.contains_key(m.as_str())) {
                return Err(SkinError::TaskNotFound {
                    name: missing.clone(),
                })
                .with_context(|| format!("Series '{name}' references an unregistered task"));
            }
        }

        tracing::trace!("Registered task '{name}'");
        self.order.push(name.to_string());
        self.tasks.insert(name.to_string(), task);
        Ok(())
    }

    /// Registers an async action.
    pub fn action<F, Fut>(&mut self, name: &str, action: F) -> Result<()>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<()>> + Send + 'static,
    {
        self.register(name, Task::Action(Arc::new(move || action().boxed())))
    }

    /// Registers a series of already registered tasks.
    pub fn series(&mut self, name: &str, members: &[&str]) -> Result<()> {
        self.register(name, Task::Series(members.iter().map(|m| (*m).to_string()).collect()))
    }

    /// Task names in registration order.
    pub fn task_names(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Looks a task up.
    pub fn get(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    /// Runs a task to completion.
    pub fn run<'a>(&'a self, name: &'a str) -> BoxFuture<'a, Result<()>> {
        async move {
            let task = self.tasks.get(name).ok_or_else(|| SkinError::TaskNotFound {
                name: name.to_string(),
            })?;

            tracing::info!("Starting '{name}'...");
            let started = Instant::now();

            match task {
                Task::Action(action) => {
                    let spinner = self.show_progress.then(|| {
                        let spinner = ProgressBar::new_spinner();
                        spinner.set_prefix(name);
                        spinner.set_message("running");
                        spinner
                    });
                    let result = action().await;
                    if let Some(spinner) = spinner {
                        spinner.finish_and_clear();
                    }
                    result.with_context(|| format!("Task '{name}' failed"))?;
                }
                Task::Series(members) => {
                    for member in members {
                        self.run(member).await?;
                    }
                }
            }

            tracing::info!("Finished '{name}' after {}", format_elapsed(started.elapsed()));
            Ok(())
        }
        .boxed()
    }
}

/// `850 ms`, `1.42 s`
pub fn format_elapsed(elapsed: Duration) -> String {
    if elapsed < Duration::from_secs(1) {
        format!("{} ms", elapsed.as_millis())
    } else {
        format!("{:.2} s", elapsed.as_secs_f64())
    }
}
