//! DataRepository - central store of the tenancy's IAM data
//!
//! Holds the last loaded users, policies and groups. Every loader is gated
//! on `initialize()` having run; `reset()` returns to the constructed state.

use shared::{Group, Policy, PolicyStatement, Tenancy, User};
use tracing::info;

use crate::error::{RepositoryError, Result};
use crate::placeholder::PlaceholderProvider;
use crate::provider::{AuthMethod, IdentityProvider, InitOptions};

/// Repository for OCI IAM data, initialized via a tenancy profile or the
/// instance principal, optionally traversing child compartments
#[derive(Debug)]
pub struct DataRepository<P: IdentityProvider = PlaceholderProvider> {
    provider: P,
    initialized: bool,
    profile_name: Option<String>,
    tenancy: Option<Tenancy>,
    use_instance_principal: bool,
    recursive: bool,
    /// Compartments policies are loaded from, root first
    scope: Vec<String>,

    users: Vec<User>,
    policies: Vec<Policy>,
    groups: Vec<Group>,
}

impl<P: IdentityProvider> DataRepository<P> {
    /// Create an uninitialized repository over a provider
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            initialized: false,
            profile_name: None,
            tenancy: None,
            use_instance_principal: false,
            recursive: false,
            scope: Vec::new(),
            users: Vec::new(),
            policies: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Initialize the repository using either a profile or the instance principal
    pub fn initialize(&mut self, options: InitOptions) -> Result<()> {
        let auth = options.auth_method();
        self.initialized = false;
        self.profile_name = options.profile_name;
        self.use_instance_principal = options.use_instance_principal;
        self.recursive = options.recursive;

        match &auth {
            AuthMethod::InstancePrincipal => {
                info!("Initializing repository with Instance Principal.");
            }
            AuthMethod::ConfigProfile(name) => {
                info!("Initializing repository with profile: {}", name);
            }
        }

        let tenancy = self.provider.connect(&auth)?;

        let mut scope = vec![tenancy.ocid.clone()];
        if self.recursive {
            scope.extend(tenancy.descendants_of(&tenancy.ocid));
        }
        tracing::debug!(
            tenancy = %tenancy.ocid,
            compartments = scope.len(),
            "Resolved compartment scope"
        );

        self.scope = scope;
        self.tenancy = Some(tenancy);
        self.initialized = true;
        info!("DataRepository initialized successfully.");
        Ok(())
    }

    fn connected_tenancy(&self) -> Result<&Tenancy> {
        if !self.initialized {
            return Err(RepositoryError::NotInitialized);
        }
        self.tenancy.as_ref().ok_or(RepositoryError::NotInitialized)
    }

    /// Load users for the tenancy
    pub fn load_users(&mut self) -> Result<&[User]> {
        let users = {
            let tenancy = self.connected_tenancy()?;
            self.provider.list_users(tenancy)?
        };
        self.users = users;
        info!("Loaded {} users.", self.users.len());
        Ok(&self.users)
    }

    /// Load IAM policies for every compartment in scope
    pub fn load_policies(&mut self) -> Result<&[Policy]> {
        let policies = {
            let tenancy = self.connected_tenancy()?;
            let mut all = Vec::new();
            for compartment_id in &self.scope {
                all.extend(self.provider.list_policies(tenancy, compartment_id)?);
            }
            all
        };
        self.policies = policies;
        info!("Loaded {} policies.", self.policies.len());
        Ok(&self.policies)
    }

    /// Load groups for the tenancy
    pub fn load_groups(&mut self) -> Result<&[Group]> {
        let groups = {
            let tenancy = self.connected_tenancy()?;
            self.provider.list_groups(tenancy)?
        };
        self.groups = groups;
        info!("Loaded {} groups.", self.groups.len());
        Ok(&self.groups)
    }

    /// Reset repository to uninitialized state
    pub fn reset(&mut self) {
        info!("Resetting repository state.");
        self.initialized = false;
        self.profile_name = None;
        self.tenancy = None;
        self.use_instance_principal = false;
        self.recursive = false;
        self.scope.clear();
        self.users.clear();
        self.policies.clear();
        self.groups.clear();
    }

    /// Loaded policies with a statement granting to `group`
    pub fn policies_for_group(&self, group: &str) -> Vec<&Policy> {
        self.policies
            .iter()
            .filter(|p| {
                p.statements
                    .iter()
                    .filter_map(|s| PolicyStatement::parse(s))
                    .any(|s| s.applies_to_group(group))
            })
            .collect()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn profile_name(&self) -> Option<&str> {
        self.profile_name.as_deref()
    }

    pub fn tenancy_ocid(&self) -> Option<&str> {
        self.tenancy.as_ref().map(|t| t.ocid.as_str())
    }

    pub fn uses_instance_principal(&self) -> bool {
        self.use_instance_principal
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// Compartment IDs policies are loaded from
    pub fn scope(&self) -> &[String] {
        &self.scope
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl Default for DataRepository<PlaceholderProvider> {
    fn default() -> Self {
        Self::new(PlaceholderProvider::default())
    }
}
