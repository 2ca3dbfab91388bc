//! Per-process session token gating the UI

use std::fmt;

use uuid::Uuid;

/// Random token printed at startup and typed into the login overlay.
///
/// Not a security boundary: it only keeps a stray terminal from being used
/// without someone reading the startup output.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh random token
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compare with user input, ignoring surrounding whitespace
    pub fn matches(&self, input: &str) -> bool {
        input.trim() == self.0
    }
}

impl From<&str> for SessionToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_uuid() {
        let token = SessionToken::generate();
        assert!(Uuid::parse_str(token.as_str()).is_ok());
    }

    #[test]
    fn test_tokens_differ() {
        assert_ne!(SessionToken::generate(), SessionToken::generate());
    }

    #[test]
    fn test_matches_trims_input() {
        let token = SessionToken::from("abc-123");
        assert!(token.matches("abc-123"));
        assert!(token.matches("  abc-123\n"));
        assert!(!token.matches("abc-12"));
        assert!(!token.matches(""));
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = SessionToken::from("secret");
        assert!(!format!("{:?}", token).contains("secret"));
    }
}
