//! Write a default `skinpack.toml`.

use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;
use std::path::Path;

use crate::config::{CONFIG_FILE_NAME, SkinConfig};
use crate::utils::fs::{ensure_dir, safe_write};

/// Write a default skinpack.toml into the project root.
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Overwrite an existing configuration file
    #[arg(short, long)]
    force: bool,
}

impl InitCommand {
    pub async fn execute(self, project_root: &Path) -> Result<()> {
        let config_path = project_root.join(CONFIG_FILE_NAME);

        if config_path.exists() && !self.force {
            return Err(anyhow!(
                "Configuration already exists at {}. Use --force to overwrite",
                config_path.display()
            ));
        }

        ensure_dir(project_root)?;
        safe_write(&config_path, &SkinConfig::init_example()?)?;

        println!("{} Initialized {} at {}", "✓".green(), CONFIG_FILE_NAME, config_path.display());
        println!("\n{}", "Next steps:".cyan());
        println!("  Embed styles in your templates between <b:skin> tags");
        println!("  Then run {} to build the skin", "skinpack run".bright_white());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_writes_loadable_config() {
        let temp = TempDir::new().unwrap();
        InitCommand { force: false }.execute(temp.path()).await.unwrap();

        let config_path = temp.path().join(CONFIG_FILE_NAME);
        let loaded = SkinConfig::load_from(&config_path).await.unwrap();
        assert_eq!(loaded, SkinConfig::default());
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&config_path, "[src]\n").unwrap();

        let err = InitCommand { force: false }.execute(temp.path()).await.unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert_eq!(std::fs::read_to_string(&config_path).unwrap(), "[src]\n");

        InitCommand { force: true }.execute(temp.path()).await.unwrap();
        assert!(std::fs::read_to_string(&config_path).unwrap().contains("[build]"));
    }
}
