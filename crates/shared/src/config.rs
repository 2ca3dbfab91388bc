//! Configuration types for IAM Console

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::level::LogLevel;

/// Default name of the config file written by `init`
pub const CONFIG_FILE_NAME: &str = "iam-console.json";

/// Log file sink settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingConfig {
    /// Directory holding the log file and its backups
    pub dir: PathBuf,

    /// Active log file name inside `dir`
    pub file_name: String,

    /// Size in bytes after which the file is rotated
    pub max_bytes: u64,

    /// Number of rotated backups kept (`app.log.1` .. `app.log.N`)
    pub backup_count: usize,

    /// Initial level for application and SDK targets
    pub level: LogLevel,

    /// Records kept by the in-UI console panel
    pub console_capacity: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./logs"),
            file_name: "app.log".to_string(),
            max_bytes: 5 * 1024 * 1024,
            backup_count: 5,
            level: LogLevel::Info,
            console_capacity: 1000,
        }
    }
}

impl LoggingConfig {
    /// Full path of the active log file
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

/// Which placeholder data set the repository serves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Fixture {
    /// Two users, two groups, two policies
    #[default]
    Fixed,
    /// Numbered sample records for exercising long tables
    Generated { policies: usize, users: usize },
}

impl Fixture {
    /// The sample sizes the console has always shipped with
    pub fn demo() -> Self {
        Fixture::Generated {
            policies: 20,
            users: 30,
        }
    }
}

/// Identity data source settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepositoryConfig {
    /// OCI config file to discover profiles from (defaults to ~/.oci/config)
    pub oci_config_file: Option<PathBuf>,

    /// Profiles offered when none can be discovered
    pub profiles: Vec<String>,

    /// Authenticate with the instance principal instead of a profile
    pub use_instance_principal: bool,

    /// Traverse child compartments when loading policies
    pub recursive: bool,

    /// Placeholder data set
    pub fixture: Fixture,
}

/// Top-level configuration file (iam-console.json)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub repository: RepositoryConfig,
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise from `./iam-console.json` if present,
    /// otherwise defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => {
                let local = Path::new(CONFIG_FILE_NAME);
                if local.exists() {
                    Self::from_file(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Serialize as pretty JSON, the format `init` writes
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the log sink cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.logging.file_name.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.fileName must not be empty".to_string()));
        }
        if self.logging.max_bytes == 0 {
            return Err(ConfigError::Invalid("logging.maxBytes must be greater than 0".to_string()));
        }
        if self.logging.console_capacity == 0 {
            return Err(ConfigError::Invalid(
                "logging.consoleCapacity must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
