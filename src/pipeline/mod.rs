//! File processing engine shared by the extract and compile actions.
//!
//! A [`Pipeline`] is a [`FileSet`], an ordered list of [`Transform`] stages
//! and a destination directory. Running it:
//!
//! 1. resolves the file set (an empty set is a no-op)
//! 2. reads each file into a [`SourceFile`]
//! 3. applies every stage in order
//! 4. writes the result atomically to `dest / relative_path`
//!
//! Files are processed concurrently, bounded by the configured concurrency;
//! the stages of one file always run in order on a single blocking worker.
//!
//! # Examples
//!
//! ```rust,no_run
//! use skinpack::pattern::FileSet;
//! use skinpack::pipeline::{Pipeline, SourceFile, Transform};
//!
//! struct Upper;
//!
//! impl Transform for Upper {
//!     fn name(&self) -> &'static str {
//!         "upper"
//!     }
//!
//!     fn apply(&self, mut file: SourceFile) -> anyhow::Result<SourceFile> {
//!         file.contents = file.contents.to_uppercase();
//!         Ok(file)
//!     }
//! }
//!
//! # async fn example() -> anyhow::Result<()> {
//! let written = Pipeline::new("upper", FileSet::new("in").include("*.txt")?, "out")
//!     .stage(Upper)
//!     .run()
//!     .await?;
//! println!("wrote {} files", written.len());
//! # Ok(())
//! # }
//! ```

mod source;

pub use source::SourceFile;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::pattern::FileSet;
use crate::utils::fs::atomic_write;

/// One processing stage applied to every file of a pipeline.
///
/// Stages run on blocking worker threads and may do synchronous I/O.
pub trait Transform: Send + Sync {
    /// Short stage name used in logs and error context.
    fn name(&self) -> &'static str;

    /// Transforms one file.
    fn apply(&self, file: SourceFile) -> Result<SourceFile>;
}

/// Sources, stages and destination of one file-processing action.
pub struct Pipeline {
    name: String,
    sources: FileSet,
    stages: Vec<Arc<dyn Transform>>,
    dest: PathBuf,
    concurrency: Option<usize>,
}

impl Pipeline {
    /// Creates a pipeline without stages.
    pub fn new(name: impl Into<String>, sources: FileSet, dest: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            sources,
            stages: Vec::new(),
            dest: dest.into(),
            concurrency: None,
        }
    }

    /// Appends a stage.
    #[must_use]
    pub fn stage(mut self, stage: impl Transform + 'static) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Limits how many files are processed at once. `None` means one worker
    /// per file.
    #[must_use]
    pub fn concurrency(mut self, concurrency: Option<usize>) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Names of the stages, in order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Applies every stage to `file` in order.
    pub fn process(&self, file: SourceFile) -> Result<SourceFile> {
        apply_stages(&self.stages, file)
    }

    /// Runs the pipeline and returns the written paths in sorted order.
    ///
    /// When several files fail, each failure is logged and the first one (by
    /// source path) is returned.
    pub async fn run(&self) -> Result<Vec<PathBuf>> {
        let files = discover(&self.sources).await?;
        if files.is_empty() {
            tracing::debug!(
                "'{}': no files matched {:?} in {}",
                self.name,
                self.sources.patterns(),
                self.sources.base().display()
            );
            return Ok(Vec::new());
        }

        let total = files.len();
        let concurrency = self.concurrency.unwrap_or(total).max(1);
        tracing::debug!("'{}': processing {total} file(s), concurrency {concurrency}", self.name);

        let base = self.sources.base().to_path_buf();
        let mut results: Vec<(PathBuf, Result<PathBuf>)> = stream::iter(files)
            .map(|path| {
                let stages = self.stages.clone();
                let base = base.clone();
                let dest = self.dest.clone();

                async move {
                    let source = path.clone();
                    let outcome = tokio::task::spawn_blocking(move || {
                        process_and_write(&stages, &source, &base, &dest)
                    })
                    .await
                    .context("Pipeline worker panicked")
                    .and_then(|r| r);
                    (path, outcome)
                }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        results.sort_by(|a, b| a.0.cmp(&b.0));

        let mut written = Vec::with_capacity(total);
        let mut errors = Vec::new();
        for (path, outcome) in results {
            match outcome {
                Ok(output) => written.push(output),
                Err(error) => errors.push((path, error)),
            }
        }

        if !errors.is_empty() {
            let failed = errors.len();
            for (path, error) in &errors {
                tracing::error!("'{}': {}: {error:#}", self.name, path.display());
            }
            let (_, first) = errors.remove(0);
            return Err(first.context(format!("{failed} of {total} file(s) failed in '{}'", self.name)));
        }

        written.sort();
        Ok(written)
    }
}

/// Resolves a file set on a blocking worker.
pub async fn discover(sources: &FileSet) -> Result<Vec<PathBuf>> {
    let sources = sources.clone();
    tokio::task::spawn_blocking(move || sources.resolve())
        .await
        .context("File discovery task panicked")?
}

fn apply_stages(stages: &[Arc<dyn Transform>], mut file: SourceFile) -> Result<SourceFile> {
    for stage in stages {
        let path = file.path().to_path_buf();
        tracing::trace!("{} <- {}", stage.name(), path.display());
        file = stage
            .apply(file)
            .with_context(|| format!("Stage '{}' failed for {}", stage.name(), path.display()))?;
    }
    Ok(file)
}

fn process_and_write(
    stages: &[Arc<dyn Transform>],
    path: &Path,
    base: &Path,
    dest: &Path,
) -> Result<PathBuf> {
    let file = apply_stages(stages, SourceFile::read(path, base)?)?;
    let output = dest.join(file.relative_path());
    atomic_write(&output, file.contents.as_bytes())?;
    tracing::debug!("{} -> {}", path.display(), output.display());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SkinError;
    use tempfile::TempDir;

    struct Suffix(&'static str);

    impl Transform for Suffix {
        fn name(&self) -> &'static str {
            "suffix"
        }

        fn apply(&self, mut file: SourceFile) -> Result<SourceFile> {
            file.contents.push_str(self.0);
            Ok(file)
        }
    }

    struct RenameTo(&'static str);

    impl Transform for RenameTo {
        fn name(&self) -> &'static str {
            "rename"
        }

        fn apply(&self, mut file: SourceFile) -> Result<SourceFile> {
            file.set_extension(self.0);
            Ok(file)
        }
    }

    struct FailOn(&'static str);

    impl Transform for FailOn {
        fn name(&self) -> &'static str {
            "fail"
        }

        fn apply(&self, file: SourceFile) -> Result<SourceFile> {
            if file.contents.contains(self.0) {
                return Err(SkinError::Other {
                    message: format!("found {}", self.0),
                }
                .into());
            }
            Ok(file)
        }
    }

    #[tokio::test]
    async fn test_stages_run_in_order() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        std::fs::create_dir_all(src.join("nested")).unwrap();
        std::fs::write(src.join("a.txt"), "a").unwrap();
        std::fs::write(src.join("nested/b.txt"), "b").unwrap();

        let out = temp.path().join("out");
        let pipeline = Pipeline::new("test", FileSet::new(&src).include("**/*.txt").unwrap(), &out)
            .stage(Suffix("1"))
            .stage(Suffix("2"))
            .stage(RenameTo("md"))
            .concurrency(Some(1));

        assert_eq!(pipeline.stage_names(), vec!["suffix", "suffix", "rename"]);

        let written = pipeline.run().await.unwrap();
        assert_eq!(written, vec![out.join("a.md"), out.join("nested/b.md")]);
        assert_eq!(std::fs::read_to_string(out.join("a.md")).unwrap(), "a12");
        assert_eq!(std::fs::read_to_string(out.join("nested/b.md")).unwrap(), "b12");
    }

    #[tokio::test]
    async fn test_empty_match_is_noop() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        let written = Pipeline::new("empty", FileSet::new(temp.path().join("none")).include("*.txt").unwrap(), &out)
            .run()
            .await
            .unwrap();
        assert!(written.is_empty());
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_failure_keeps_typed_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("good.txt"), "fine").unwrap();
        std::fs::write(temp.path().join("bad.txt"), "boom").unwrap();

        let out = temp.path().join("out");
        let err = Pipeline::new("fail", FileSet::new(temp.path()).include("*.txt").unwrap(), &out)
            .stage(FailOn("boom"))
            .run()
            .await
            .unwrap_err();

        assert!(err.to_string().contains("1 of 2 file(s) failed"));
        assert!(matches!(err.downcast_ref::<SkinError>(), Some(SkinError::Other { .. })));
    }
}
