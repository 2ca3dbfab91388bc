//! Best-effort parsing of policy statements
//!
//! Statements look like `ALLOW group Admins to manage all-resources in tenancy`.
//! Anything that does not match is left alone; callers keep the raw text.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Who a statement grants access to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "kebab-case")]
pub enum Subject {
    Group(String),
    DynamicGroup(String),
    Service(String),
    AnyUser,
}

/// A parsed `ALLOW ... to <verb> <resource>` statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyStatement {
    pub subject: Subject,
    pub verb: String,
    pub resource: String,
    pub location: Option<String>,
    pub condition: Option<String>,
}

fn statement_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^\s*allow\s+(?P<subject>any-user|(?:group|dynamic-group|service)\s+\S+)\s+to\s+(?P<verb>\S+)\s+(?P<resource>\S+)(?:\s+in\s+(?P<location>.+?))?(?:\s+where\s+(?P<condition>.+?))?\s*$",
        )
        .expect("statement pattern is valid")
    })
}

impl PolicyStatement {
    /// Parse a single statement, returning `None` for unrecognized text
    pub fn parse(text: &str) -> Option<Self> {
        let caps = statement_regex().captures(text)?;

        let subject_text = caps.name("subject")?.as_str();
        let subject = parse_subject(subject_text)?;

        Some(Self {
            subject,
            verb: caps.name("verb")?.as_str().to_string(),
            resource: caps.name("resource")?.as_str().to_string(),
            location: caps.name("location").map(|m| m.as_str().to_string()),
            condition: caps.name("condition").map(|m| m.as_str().to_string()),
        })
    }

    /// Whether this statement grants to the named group (case-insensitive)
    pub fn applies_to_group(&self, group: &str) -> bool {
        matches!(&self.subject, Subject::Group(name) if name.eq_ignore_ascii_case(group))
    }
}

fn parse_subject(text: &str) -> Option<Subject> {
    if text.eq_ignore_ascii_case("any-user") {
        return Some(Subject::AnyUser);
    }

    let (kind, name) = text.split_once(char::is_whitespace)?;
    let name = name.trim().to_string();
    match kind.to_ascii_lowercase().as_str() {
        "group" => Some(Subject::Group(name)),
        "dynamic-group" => Some(Subject::DynamicGroup(name)),
        "service" => Some(Subject::Service(name)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_group_statement() {
        let stmt = PolicyStatement::parse("ALLOW group Admins to manage all-resources").unwrap();
        assert_eq!(stmt.subject, Subject::Group("Admins".to_string()));
        assert_eq!(stmt.verb, "manage");
        assert_eq!(stmt.resource, "all-resources");
        assert!(stmt.location.is_none());
        assert!(stmt.condition.is_none());
    }

    #[test]
    fn test_parse_location_and_condition() {
        let stmt = PolicyStatement::parse(
            "Allow group Readers to read buckets in compartment Dev where target.bucket.name='logs'",
        )
        .unwrap();
        assert_eq!(stmt.location.as_deref(), Some("compartment Dev"));
        assert_eq!(stmt.condition.as_deref(), Some("target.bucket.name='logs'"));
    }

    #[test]
    fn test_parse_any_user_and_dynamic_group() {
        let any = PolicyStatement::parse("allow any-user to inspect users in tenancy").unwrap();
        assert_eq!(any.subject, Subject::AnyUser);

        let dg =
            PolicyStatement::parse("Allow dynamic-group Fns to use secrets in tenancy").unwrap();
        assert_eq!(dg.subject, Subject::DynamicGroup("Fns".to_string()));
    }

    #[test]
    fn test_unrecognized_statement() {
        assert!(PolicyStatement::parse("Define tenancy Acme as ocid1.tenancy").is_none());
        assert!(PolicyStatement::parse("").is_none());
    }

    #[test]
    fn test_applies_to_group_case_insensitive() {
        let stmt = PolicyStatement::parse("ALLOW group G1 to read resource1").unwrap();
        assert!(stmt.applies_to_group("g1"));
        assert!(!stmt.applies_to_group("G2"));
    }
}
