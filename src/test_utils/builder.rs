//! Test project builder for simplified test setup
//!
//! Creates a throwaway project directory with a configuration and any number
//! of files, and hands out the resolved options and a registered task
//! runner.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::fixtures::{BannerFixture, FileFixture, LintFixture};
use crate::config::{CONFIG_FILE_NAME, SkinConfig, SkinOptions};
use crate::tasks::{Registrar, SkinRegistry, TaskRunner};

pub struct TestProjectBuilder {
    temp_dir: TempDir,
    config: Option<SkinConfig>,
    files: Vec<(String, String)>,
}

impl TestProjectBuilder {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
            config: None,
            files: Vec::new(),
        })
    }

    /// Writes `config` as `skinpack.toml`.
    pub fn with_config(mut self, config: SkinConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push((path.into(), content.into()));
        self
    }

    pub fn with_files(mut self, files: Vec<(&str, &str)>) -> Self {
        for (path, content) in files {
            self.files.push((path.to_string(), content.to_string()));
        }
        self
    }

    pub fn with_fixture(mut self, fixture: FileFixture) -> Self {
        self.files.push((fixture.path.to_string(), fixture.content));
        self
    }

    /// Adds the banner files and the strict lint configuration.
    pub fn with_defaults(mut self) -> Self {
        for fixture in BannerFixture::files() {
            self = self.with_fixture(fixture);
        }
        self.with_fixture(LintFixture::strict())
    }

    pub fn build(self) -> Result<TestProject> {
        let root = self.temp_dir.path().to_path_buf();

        if let Some(config) = &self.config {
            std::fs::write(root.join(CONFIG_FILE_NAME), toml::to_string_pretty(config)?)?;
        }

        for (path, content) in &self.files {
            write(&root, path, content)?;
        }

        Ok(TestProject {
            _temp_dir: self.temp_dir,
            root,
            config: self.config.unwrap_or_default(),
        })
    }
}

/// A project living in a temporary directory.
pub struct TestProject {
    _temp_dir: TempDir,
    root: PathBuf,
    config: SkinConfig,
}

impl TestProject {
    pub fn builder() -> Result<TestProjectBuilder> {
        TestProjectBuilder::new()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    pub fn config(&self) -> &SkinConfig {
        &self.config
    }

    pub fn options(&self) -> Result<SkinOptions> {
        SkinOptions::resolve(&self.config, &self.root)
    }

    /// A runner with the skin tasks registered and progress output off.
    pub fn runner(&self) -> Result<TaskRunner> {
        let mut runner = TaskRunner::new();
        SkinRegistry::new(&self.config, &self.root)?.init(&mut runner)?;
        Ok(runner)
    }

    pub fn write_file(&self, rel: &str, content: &str) -> Result<()> {
        write(&self.root, rel, content)
    }

    pub fn read_file(&self, rel: &str) -> Result<String> {
        Ok(std::fs::read_to_string(self.path(rel))?)
    }

    pub fn file_exists(&self, rel: &str) -> bool {
        self.path(rel).exists()
    }
}

fn write(root: &Path, rel: &str, content: &str) -> Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
