//! Placeholder Provider
//!
//! Serves canned identity records so the console can be exercised without
//! credentials. Stands in for an SDK-backed provider.

use shared::{Compartment, Fixture, Group, Policy, Tenancy, User};

use crate::error::Result;
use crate::provider::{AuthMethod, IdentityProvider};

/// OCID reported for the placeholder tenancy
pub const PLACEHOLDER_TENANCY_OCID: &str = "ocid1.tenancy.oc1..placeholder";

/// Provider returning hard-coded records
#[derive(Debug, Clone)]
pub struct PlaceholderProvider {
    tenancy: Tenancy,
    users: Vec<User>,
    groups: Vec<Group>,
    policies: Vec<Policy>,
}

impl PlaceholderProvider {
    /// Build the provider for a fixture
    pub fn new(fixture: Fixture) -> Self {
        match fixture {
            Fixture::Fixed => Self::fixed(),
            Fixture::Generated { policies, users } => Self::generated(policies, users),
        }
    }

    /// Two users, two groups, two policies, all in the tenancy root
    pub fn fixed() -> Self {
        Self {
            tenancy: Tenancy::new(PLACEHOLDER_TENANCY_OCID, "placeholder"),
            users: vec![
                User::new("u1", "Alice").with_group("Admins"),
                User::new("u2", "Bob").with_group("Readers"),
            ],
            groups: vec![Group::new("g1", "Admins"), Group::new("g2", "Readers")],
            policies: vec![
                Policy::new("p1", "AdminPolicy")
                    .with_statement("ALLOW group Admins to manage all-resources"),
                Policy::new("p2", "ReadPolicy")
                    .with_statement("ALLOW group Readers to read all-resources"),
            ],
        }
    }

    /// Numbered sample records spread over a small compartment tree.
    ///
    /// Every fifth policy lives in a child compartment, so only a recursive
    /// load returns all of them.
    pub fn generated(policy_count: usize, user_count: usize) -> Self {
        let tenancy = Tenancy::new(PLACEHOLDER_TENANCY_OCID, "placeholder")
            .with_compartment(Compartment::new("ocid1.compartment.oc1..dev", "Dev"))
            .with_compartment(
                Compartment::new("ocid1.compartment.oc1..sandbox", "Sandbox")
                    .with_parent("ocid1.compartment.oc1..dev"),
            )
            .with_compartment(Compartment::new("ocid1.compartment.oc1..prod", "Prod"));

        let child_ids: Vec<String> = tenancy.compartments.iter().map(|c| c.id.clone()).collect();

        let policies = (1..=policy_count)
            .map(|i| {
                let policy = Policy::new(format!("p{}", i), format!("Policy{}", i))
                    .with_statement(format!("ALLOW group G{} to read resource{}", i, i));
                if i % 5 == 0 {
                    let compartment = &child_ids[(i / 5 - 1) % child_ids.len()];
                    policy.in_compartment(compartment.clone())
                } else {
                    policy
                }
            })
            .collect();

        let users = (1..=user_count)
            .map(|i| {
                User::new(format!("u{}", i), format!("User{}", i))
                    .with_group(format!("Group{}", i % 3))
            })
            .collect();

        let groups = (0..3)
            .map(|i| Group::new(format!("g{}", i), format!("Group{}", i)))
            .collect();

        Self {
            tenancy,
            users,
            groups,
            policies,
        }
    }
}

impl Default for PlaceholderProvider {
    fn default() -> Self {
        Self::fixed()
    }
}

impl IdentityProvider for PlaceholderProvider {
    fn connect(&mut self, auth: &AuthMethod) -> Result<Tenancy> {
        tracing::debug!("Placeholder provider accepting {} without authentication", auth);
        Ok(self.tenancy.clone())
    }

    fn list_users(&self, _tenancy: &Tenancy) -> Result<Vec<User>> {
        Ok(self.users.clone())
    }

    fn list_groups(&self, _tenancy: &Tenancy) -> Result<Vec<Group>> {
        Ok(self.groups.clone())
    }

    fn list_policies(&self, tenancy: &Tenancy, compartment_id: &str) -> Result<Vec<Policy>> {
        Ok(self
            .policies
            .iter()
            .filter(|p| p.compartment_id.as_deref().unwrap_or(&tenancy.ocid) == compartment_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connect(provider: &mut PlaceholderProvider) -> Tenancy {
        provider
            .connect(&AuthMethod::ConfigProfile("DEFAULT".to_string()))
            .unwrap()
    }

    #[test]
    fn test_fixed_records() {
        let mut provider = PlaceholderProvider::fixed();
        let tenancy = connect(&mut provider);

        let users = provider.list_users(&tenancy).unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "Alice");
        assert_eq!(users[1].groups, vec!["Readers"]);

        let groups = provider.list_groups(&tenancy).unwrap();
        assert_eq!(
            groups.iter().map(|g| g.name.as_str()).collect::<Vec<_>>(),
            vec!["Admins", "Readers"]
        );

        let policies = provider.list_policies(&tenancy, &tenancy.ocid).unwrap();
        assert_eq!(policies.len(), 2);
        assert_eq!(policies[1].statements, vec!["ALLOW group Readers to read all-resources"]);
    }

    #[test]
    fn test_generated_records() {
        let mut provider = PlaceholderProvider::generated(20, 30);
        let tenancy = connect(&mut provider);

        let users = provider.list_users(&tenancy).unwrap();
        assert_eq!(users.len(), 30);
        assert_eq!(users[0].groups, vec!["Group1"]);
        assert_eq!(users[2].groups, vec!["Group0"]);

        let root = provider.list_policies(&tenancy, &tenancy.ocid).unwrap();
        assert_eq!(root.len(), 16);
        assert_eq!(root[0].statements, vec!["ALLOW group G1 to read resource1"]);

        let total: usize = std::iter::once(tenancy.ocid.clone())
            .chain(tenancy.descendants_of(&tenancy.ocid))
            .map(|c| provider.list_policies(&tenancy, &c).unwrap().len())
            .sum();
        assert_eq!(total, 20);
    }

    #[test]
    fn test_new_from_fixture() {
        let provider = PlaceholderProvider::new(Fixture::demo());
        assert_eq!(provider.users.len(), 30);
        assert_eq!(provider.policies.len(), 20);

        let provider = PlaceholderProvider::new(Fixture::Fixed);
        assert_eq!(provider.users.len(), 2);
    }
}
