//! Log levels selectable from the settings page and the command line

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownLevelError;

/// Log verbosity, named the way the console and the log file print it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    #[serde(alias = "WARN")]
    Warning,
    Error,
}

impl LogLevel {
    /// Levels offered by the settings page, in display order
    pub const SELECTABLE: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
    ];

    /// Get the upper-case name of this level
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    /// Next selectable level, wrapping around
    pub fn next(&self) -> LogLevel {
        let idx = self.selectable_index();
        Self::SELECTABLE[(idx + 1) % Self::SELECTABLE.len()]
    }

    /// Previous selectable level, wrapping around
    pub fn previous(&self) -> LogLevel {
        let idx = self.selectable_index();
        let len = Self::SELECTABLE.len();
        Self::SELECTABLE[(idx + len - 1) % len]
    }

    fn selectable_index(&self) -> usize {
        // TRACE is not offered in the selector; treat it as DEBUG.
        Self::SELECTABLE
            .iter()
            .position(|l| l == self)
            .unwrap_or(0)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = UnknownLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(UnknownLevelError {
                name: s.to_string(),
                expected: ["TRACE", "DEBUG", "INFO", "WARNING", "ERROR"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level_names() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!(" Error ".parse::<LogLevel>().unwrap(), LogLevel::Error);
    }

    #[test]
    fn test_parse_unknown_level() {
        let err = "verbose".parse::<LogLevel>().unwrap_err();
        assert_eq!(err.name, "verbose");
        assert!(err.to_string().contains("WARNING"));
    }

    #[test]
    fn test_display_uses_warning() {
        assert_eq!(LogLevel::Warning.to_string(), "WARNING");
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn test_cycle_selectable_levels() {
        assert_eq!(LogLevel::Debug.next(), LogLevel::Info);
        assert_eq!(LogLevel::Error.next(), LogLevel::Debug);
        assert_eq!(LogLevel::Debug.previous(), LogLevel::Error);
        assert_eq!(LogLevel::Trace.next(), LogLevel::Info);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&LogLevel::Warning).unwrap();
        assert_eq!(json, "\"WARNING\"");
        let parsed: LogLevel = serde_json::from_str("\"WARN\"").unwrap();
        assert_eq!(parsed, LogLevel::Warning);
    }
}
