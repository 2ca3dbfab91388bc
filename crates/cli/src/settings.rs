//! Settings page form state

use repository::{InitOptions, DEFAULT_PROFILE};

/// Focusable rows of the settings page, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Profile,
    InstancePrincipal,
    Recursive,
    ShowConsole,
    LogLevel,
    Save,
    Reset,
    GoPolicies,
    GoUsers,
}

impl SettingsField {
    pub const ALL: [SettingsField; 9] = [
        SettingsField::Profile,
        SettingsField::InstancePrincipal,
        SettingsField::Recursive,
        SettingsField::ShowConsole,
        SettingsField::LogLevel,
        SettingsField::Save,
        SettingsField::Reset,
        SettingsField::GoPolicies,
        SettingsField::GoUsers,
    ];

    fn position(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> SettingsField {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> SettingsField {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }
}

/// Values edited on the settings page before they are saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    profiles: Vec<String>,
    profile_index: usize,
    pub use_instance_principal: bool,
    pub recursive: bool,
    pub focus: SettingsField,
}

impl SettingsForm {
    pub fn new(profiles: Vec<String>) -> Self {
        let profiles = if profiles.is_empty() {
            vec![DEFAULT_PROFILE.to_string()]
        } else {
            profiles
        };
        Self {
            profiles,
            profile_index: 0,
            use_instance_principal: false,
            recursive: false,
            focus: SettingsField::Profile,
        }
    }

    pub fn with_instance_principal(mut self, enabled: bool) -> Self {
        self.use_instance_principal = enabled;
        self
    }

    pub fn with_recursive(mut self, enabled: bool) -> Self {
        self.recursive = enabled;
        self
    }

    pub fn profiles(&self) -> &[String] {
        &self.profiles
    }

    /// Currently selected tenancy profile
    pub fn profile(&self) -> &str {
        &self.profiles[self.profile_index]
    }

    pub fn next_profile(&mut self) {
        self.profile_index = (self.profile_index + 1) % self.profiles.len();
    }

    pub fn previous_profile(&mut self) {
        let len = self.profiles.len();
        self.profile_index = (self.profile_index + len - 1) % len;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Arguments for `DataRepository::initialize`
    pub fn init_options(&self) -> InitOptions {
        InitOptions {
            profile_name: Some(self.profile().to_string()),
            use_instance_principal: self.use_instance_principal,
            recursive: self.recursive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profiles_fall_back_to_default() {
        let form = SettingsForm::new(Vec::new());
        assert_eq!(form.profile(), DEFAULT_PROFILE);
    }

    #[test]
    fn test_profile_cycling() {
        let mut form = SettingsForm::new(vec!["A".into(), "B".into(), "C".into()]);
        form.next_profile();
        assert_eq!(form.profile(), "B");
        form.previous_profile();
        form.previous_profile();
        assert_eq!(form.profile(), "C");
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = SettingsForm::new(vec!["A".into()]);
        form.focus_previous();
        assert_eq!(form.focus, SettingsField::GoUsers);
        form.focus_next();
        assert_eq!(form.focus, SettingsField::Profile);
    }

    #[test]
    fn test_init_options() {
        let form = SettingsForm::new(vec!["PROD".into()])
            .with_instance_principal(true)
            .with_recursive(true);
        let opts = form.init_options();
        assert_eq!(opts.profile_name.as_deref(), Some("PROD"));
        assert!(opts.use_instance_principal);
        assert!(opts.recursive);
    }
}
