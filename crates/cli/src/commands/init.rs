//! iam-console init command

use anyhow::Context;
use clap::Args;
use console::style;
use dialoguer::Confirm;
use shared::{AppConfig, CONFIG_FILE_NAME};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Directory to write the configuration file into
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Overwrite an existing configuration file without asking
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self, config: &AppConfig) -> anyhow::Result<()> {
        let path = self.directory.join(CONFIG_FILE_NAME);

        if path.exists() && !self.force && !confirm_overwrite(&path)? {
            println!("Keeping existing {}", path.display());
            return Ok(());
        }

        self.write_config(&path, config)?;
        println!("{} Wrote {}", style("✓").green(), path.display());
        Ok(())
    }

    fn write_config(&self, path: &Path, config: &AppConfig) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.directory)
            .with_context(|| format!("creating {}", self.directory.display()))?;
        std::fs::write(path, config.to_json()?)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("Configuration written to {}", path.display());
        Ok(())
    }
}

fn confirm_overwrite(path: &Path) -> anyhow::Result<bool> {
    let answer = Confirm::new()
        .with_prompt(format!("{} exists. Overwrite?", path.display()))
        .default(false)
        .interact()?;
    Ok(answer)
}
