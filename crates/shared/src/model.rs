//! Identity records browsed by the console
//!
//! Records keep the loose shape of the identity service's listings: opaque
//! string identifiers and names, with no relational integrity between them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownKindError;

/// Common surface of every record shown in a table
pub trait Record: Serialize {
    /// Opaque identifier
    fn id(&self) -> &str;

    /// Human-readable name
    fn name(&self) -> &str;

    /// Pretty-printed JSON used by the detail panel
    fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("<unserializable: {}>", e))
    }
}

/// An identity user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    /// Names of the groups this user belongs to
    #[serde(default)]
    pub groups: Vec<String>,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            groups: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }
}

/// An identity group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
}

impl Group {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// An IAM policy made of free-form statements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub statements: Vec<String>,
    /// Compartment the policy is attached to; `None` means the tenancy root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compartment_id: Option<String>,
}

impl Policy {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            statements: Vec::new(),
            compartment_id: None,
        }
    }

    pub fn with_statement(mut self, statement: impl Into<String>) -> Self {
        self.statements.push(statement.into());
        self
    }

    pub fn in_compartment(mut self, compartment_id: impl Into<String>) -> Self {
        self.compartment_id = Some(compartment_id.into());
        self
    }
}

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Record for Group {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Record for Policy {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A node of the compartment hierarchy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compartment {
    pub id: String,
    pub name: String,
    /// Parent compartment; the tenancy root when `None`
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl Compartment {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }
}

/// The tenancy a provider connected to, with its compartment tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenancy {
    pub ocid: String,
    pub name: String,
    #[serde(default)]
    pub compartments: Vec<Compartment>,
}

impl Tenancy {
    pub fn new(ocid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ocid: ocid.into(),
            name: name.into(),
            compartments: Vec::new(),
        }
    }

    pub fn with_compartment(mut self, compartment: Compartment) -> Self {
        self.compartments.push(compartment);
        self
    }

    /// Direct children of a compartment. The tenancy OCID addresses the root.
    pub fn children_of(&self, parent_id: &str) -> Vec<&Compartment> {
        self.compartments
            .iter()
            .filter(|c| match &c.parent_id {
                Some(p) => p == parent_id,
                None => parent_id == self.ocid,
            })
            .collect()
    }

    /// Compartment IDs under `root_id`, depth-first, excluding `root_id` itself
    pub fn descendants_of(&self, root_id: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut stack: Vec<&Compartment> = self.children_of(root_id);
        stack.reverse();

        while let Some(compartment) = stack.pop() {
            // Guard against cycles in malformed hierarchies.
            if out.contains(&compartment.id) || compartment.id == root_id {
                continue;
            }
            out.push(compartment.id.clone());
            let mut children = self.children_of(&compartment.id);
            children.reverse();
            stack.extend(children);
        }

        out
    }
}

/// The three record listings the repository can load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Users,
    Groups,
    Policies,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Users => "users",
            RecordKind::Groups => "groups",
            RecordKind::Policies => "policies",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = UnknownKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "users" | "user" => Ok(RecordKind::Users),
            "groups" | "group" => Ok(RecordKind::Groups),
            "policies" | "policy" => Ok(RecordKind::Policies),
            _ => Err(UnknownKindError(s.to_string())),
        }
    }
}
