//! iam-console list command
//!
//! Loads one listing without the UI and prints it as JSON.

use clap::Args;
use repository::{DataRepository, IdentityProvider, InitOptions, PlaceholderProvider};
use shared::{AppConfig, RecordKind};

#[derive(Debug, Args)]
pub struct ListCommand {
    /// What to list: users, groups or policies
    pub kind: RecordKind,

    /// Tenancy profile to authenticate with
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Authenticate with the instance principal
    #[arg(long)]
    pub instance_principal: bool,

    /// Include policies of child compartments
    #[arg(short, long)]
    pub recursive: bool,
}

impl ListCommand {
    pub fn run(&self, config: &AppConfig) -> anyhow::Result<()> {
        let provider = PlaceholderProvider::new(config.repository.fixture);
        let mut repository = DataRepository::new(provider);
        println!("{}", self.render(&mut repository, config)?);
        Ok(())
    }

    fn options(&self, config: &AppConfig) -> InitOptions {
        InitOptions {
            profile_name: self.profile.clone(),
            use_instance_principal: self.instance_principal
                || config.repository.use_instance_principal,
            recursive: self.recursive || config.repository.recursive,
        }
    }

    /// Initialize `repository`, load the requested listing and format it
    pub fn render<P: IdentityProvider>(
        &self,
        repository: &mut DataRepository<P>,
        config: &AppConfig,
    ) -> anyhow::Result<String> {
        repository.initialize(self.options(config))?;
        let json = match self.kind {
            RecordKind::Users => serde_json::to_string_pretty(repository.load_users()?)?,
            RecordKind::Groups => serde_json::to_string_pretty(repository.load_groups()?)?,
            RecordKind::Policies => serde_json::to_string_pretty(repository.load_policies()?)?,
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Fixture, Group, User};

    fn list(kind: RecordKind) -> ListCommand {
        ListCommand {
            kind,
            profile: None,
            instance_principal: false,
            recursive: false,
        }
    }

    #[test]
    fn test_list_users_as_json() {
        let mut repository = DataRepository::default();
        let output = list(RecordKind::Users)
            .render(&mut repository, &AppConfig::default())
            .unwrap();

        let users: Vec<User> = serde_json::from_str(&output).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "Alice");
        assert_eq!(repository.profile_name(), None);
    }

    #[test]
    fn test_list_groups_as_json() {
        let mut repository = DataRepository::default();
        let output = list(RecordKind::Groups)
            .render(&mut repository, &AppConfig::default())
            .unwrap();

        let groups: Vec<Group> = serde_json::from_str(&output).unwrap();
        assert_eq!(groups[1].name, "Readers");
    }

    #[test]
    fn test_recursive_flag_reaches_child_compartments() {
        let mut config = AppConfig::default();
        config.repository.fixture = Fixture::demo();

        let mut cmd = list(RecordKind::Policies);
        let mut flat = DataRepository::new(PlaceholderProvider::new(config.repository.fixture));
        let flat_count = serde_json::from_str::<Vec<serde_json::Value>>(
            &cmd.render(&mut flat, &config).unwrap(),
        )
        .unwrap()
        .len();

        cmd.recursive = true;
        let mut deep = DataRepository::new(PlaceholderProvider::new(config.repository.fixture));
        let deep_count = serde_json::from_str::<Vec<serde_json::Value>>(
            &cmd.render(&mut deep, &config).unwrap(),
        )
        .unwrap()
        .len();

        assert_eq!(flat_count, 16);
        assert_eq!(deep_count, 20);
    }

    #[test]
    fn test_config_instance_principal_applies() {
        let mut config = AppConfig::default();
        config.repository.use_instance_principal = true;

        let mut repository = DataRepository::default();
        list(RecordKind::Users).render(&mut repository, &config).unwrap();
        assert!(repository.uses_instance_principal());
    }
}
