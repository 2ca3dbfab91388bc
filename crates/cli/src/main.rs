//! IAM Console - Terminal UI for browsing IAM users, groups and policies
//!
//! Usage:
//!   iam-console                       - Start the interactive console
//!   iam-console init [dir]            - Write a default iam-console.json
//!   iam-console list <kind>           - Print users, groups or policies as JSON
//!   iam-console profiles              - Show tenancy profiles from the OCI config

use clap::{Parser, Subcommand};
use cli::commands::{InitCommand, ListCommand, ProfilesCommand, RunCommand};
use shared::{AppConfig, Fixture, LogLevel};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "iam-console")]
#[command(about = "IAM Console - Browse IAM users, groups and policies")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (defaults to ./iam-console.json when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Initial log level: DEBUG, INFO, WARNING or ERROR
    #[arg(short, long, global = true)]
    log_level: Option<LogLevel>,

    /// Directory for the rotating log file
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Serve the larger generated sample data set
    #[arg(long, global = true)]
    demo: bool,

    /// Do not wait for a key press after printing the session token
    #[arg(long, global = true)]
    no_pause: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive console (default)
    Run,
    /// Write a default configuration file
    Init(InitCommand),
    /// Print a listing as JSON without the UI
    List(ListCommand),
    /// Show discovered tenancy profiles
    Profiles(ProfilesCommand),
}

impl Cli {
    /// CLI flags take precedence over the configuration file
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(level) = self.log_level {
            config.logging.level = level;
        }
        if let Some(dir) = &self.log_dir {
            config.logging.dir = dir.clone();
        }
        if self.demo {
            config.repository.fixture = Fixture::demo();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    match cli.command {
        // Writes the config only; no log file is created for it.
        Some(Commands::Init(cmd)) => cmd.run(&config),
        Some(Commands::List(cmd)) => {
            let _logging = logging::init(&config.logging, true)?;
            cmd.run(&config)
        }
        Some(Commands::Profiles(cmd)) => {
            let _logging = logging::init(&config.logging, true)?;
            cmd.run(&config)
        }
        Some(Commands::Run) | None => {
            let logging = logging::init(&config.logging, false)?;
            RunCommand::new(cli.no_pause).run(&config, logging)
        }
    }
}
