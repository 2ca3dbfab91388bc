//! Identity Provider - the port an SDK integration plugs into
//!
//! The repository decides WHAT to load and in which scope; a provider only
//! knows how to talk to the identity service.

use std::fmt;

use shared::{Group, Policy, Tenancy, User};

use crate::error::Result;
use crate::profiles::DEFAULT_PROFILE;

/// How the provider authenticates against the tenancy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMethod {
    /// A named profile from the OCI config file
    ConfigProfile(String),
    /// The compute instance's own principal
    InstancePrincipal,
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::ConfigProfile(name) => write!(f, "profile '{}'", name),
            AuthMethod::InstancePrincipal => f.write_str("instance principal"),
        }
    }
}

/// Arguments of `DataRepository::initialize`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitOptions {
    pub profile_name: Option<String>,
    pub use_instance_principal: bool,
    pub recursive: bool,
}

impl InitOptions {
    /// Options for a named config profile
    pub fn profile(name: impl Into<String>) -> Self {
        Self {
            profile_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Options for the instance principal
    pub fn instance_principal() -> Self {
        Self {
            use_instance_principal: true,
            ..Self::default()
        }
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Resolve the authentication method. The instance principal wins over a
    /// profile; a missing profile means `DEFAULT`.
    pub fn auth_method(&self) -> AuthMethod {
        if self.use_instance_principal {
            return AuthMethod::InstancePrincipal;
        }
        match self.profile_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => AuthMethod::ConfigProfile(name.to_string()),
            _ => AuthMethod::ConfigProfile(DEFAULT_PROFILE.to_string()),
        }
    }
}

/// Identity Provider Trait
///
/// This is a PORT in hexagonal architecture. Implementations talk to the
/// identity service; `PlaceholderProvider` serves canned records.
pub trait IdentityProvider {
    /// Authenticate and describe the tenancy, including its compartment tree
    fn connect(&mut self, auth: &AuthMethod) -> Result<Tenancy>;

    /// List users of the tenancy
    fn list_users(&self, tenancy: &Tenancy) -> Result<Vec<User>>;

    /// List groups of the tenancy
    fn list_groups(&self, tenancy: &Tenancy) -> Result<Vec<Group>>;

    /// List policies attached to one compartment (the tenancy OCID addresses the root)
    fn list_policies(&self, tenancy: &Tenancy, compartment_id: &str) -> Result<Vec<Policy>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_auth() {
        let opts = InitOptions::profile("DEFAULT");
        assert_eq!(
            opts.auth_method(),
            AuthMethod::ConfigProfile("DEFAULT".to_string())
        );
    }

    #[test]
    fn test_instance_principal_wins() {
        let opts = InitOptions {
            profile_name: Some("DEFAULT".to_string()),
            use_instance_principal: true,
            recursive: false,
        };
        assert_eq!(opts.auth_method(), AuthMethod::InstancePrincipal);
    }

    #[test]
    fn test_missing_profile_falls_back_to_default() {
        let expected = AuthMethod::ConfigProfile(DEFAULT_PROFILE.to_string());
        assert_eq!(InitOptions::default().auth_method(), expected);
        assert_eq!(InitOptions::profile("   ").auth_method(), expected);
    }

    #[test]
    fn test_auth_display() {
        assert_eq!(
            AuthMethod::ConfigProfile("PROD".to_string()).to_string(),
            "profile 'PROD'"
        );
        assert_eq!(AuthMethod::InstancePrincipal.to_string(), "instance principal");
    }
}
