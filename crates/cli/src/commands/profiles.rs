//! iam-console profiles command

use clap::Args;
use console::style;
use repository::{default_oci_config_path, discover_profiles};
use shared::AppConfig;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ProfilesCommand {
    /// OCI config file to read (defaults to $OCI_CLI_CONFIG_FILE or ~/.oci/config)
    #[arg(long)]
    pub oci_config: Option<PathBuf>,
}

impl ProfilesCommand {
    pub fn run(&self, config: &AppConfig) -> anyhow::Result<()> {
        let path = self
            .oci_config
            .clone()
            .or_else(|| config.repository.oci_config_file.clone())
            .or_else(default_oci_config_path);

        if let Some(p) = &path {
            println!("{} {}", style("OCI config:").cyan(), p.display());
        }

        let profiles = discover_profiles(path.as_deref(), &config.repository.profiles);
        for (i, profile) in profiles.iter().enumerate() {
            if i == 0 {
                println!("  {} {}", style("*").green(), style(profile).bold());
            } else {
                println!("    {}", profile);
            }
        }
        Ok(())
    }
}
