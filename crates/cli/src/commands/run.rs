//! iam-console run command (the default)

use console::{style, Term};
use logging::LoggingHandle;
use repository::{discover_profiles, DataRepository, PlaceholderProvider};
use shared::AppConfig;
use tracing::info;

use crate::app::App;
use crate::session::SessionToken;
use crate::settings::SettingsForm;
use crate::terminal;

/// Start the interactive console
#[derive(Debug, Default)]
pub struct RunCommand {
    /// Open the UI right after printing the token
    pub no_pause: bool,
}

impl RunCommand {
    pub fn new(no_pause: bool) -> Self {
        Self { no_pause }
    }

    pub fn run(&self, config: &AppConfig, logging: LoggingHandle) -> anyhow::Result<()> {
        let token = SessionToken::generate();
        let term = Term::stdout();

        term.write_line(&format!(
            "{} {}",
            style("🔑 Session token (share with user):").bold(),
            style(token.as_str()).yellow()
        ))?;

        // The alternate screen hides stdout, so give the user a chance to copy the token.
        if !self.no_pause && term.is_term() {
            term.write_line(&style("Press any key to open the console...").dim().to_string())?;
            term.read_key()?;
        }

        let profiles = discover_profiles(
            config.repository.oci_config_file.as_deref(),
            &config.repository.profiles,
        );
        let settings = SettingsForm::new(profiles)
            .with_instance_principal(config.repository.use_instance_principal)
            .with_recursive(config.repository.recursive);

        let repository = DataRepository::new(PlaceholderProvider::new(config.repository.fixture));
        info!(
            "Starting console with {} profile(s), {:?} fixture",
            settings.profiles().len(),
            config.repository.fixture
        );

        let mut app = App::new(token, repository, logging, settings);
        terminal::run(&mut app)?;

        info!("Console closed.");
        Ok(())
    }
}
