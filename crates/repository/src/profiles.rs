//! Tenancy profile discovery from the OCI config file
//!
//! The config file is INI-style; every `[SECTION]` header names a profile.

use std::path::{Path, PathBuf};

/// Profile used when nothing else is known
pub const DEFAULT_PROFILE: &str = "DEFAULT";

/// Environment variable overriding the config file location
pub const OCI_CONFIG_ENV: &str = "OCI_CLI_CONFIG_FILE";

/// `$OCI_CLI_CONFIG_FILE`, else `~/.oci/config`
pub fn default_oci_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(OCI_CONFIG_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    dirs::home_dir().map(|home| home.join(".oci").join("config"))
}

/// Section names of an INI document, in order, without duplicates
pub fn parse_profile_names(content: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if let Some(inner) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let name = inner.trim();
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

/// Profiles offered to the user.
///
/// Reads `config_file` (or the default location); falls back to `configured`,
/// then to `DEFAULT`. An unreadable file is logged and treated as empty.
pub fn discover_profiles(config_file: Option<&Path>, configured: &[String]) -> Vec<String> {
    let path = config_file.map(Path::to_path_buf).or_else(default_oci_config_path);

    let discovered = match &path {
        Some(p) if p.exists() => match std::fs::read_to_string(p) {
            Ok(content) => parse_profile_names(&content),
            Err(e) => {
                tracing::warn!("Could not read OCI config {}: {}", p.display(), e);
                Vec::new()
            }
        },
        _ => Vec::new(),
    };

    if !discovered.is_empty() {
        tracing::debug!("Discovered {} profiles", discovered.len());
        return discovered;
    }
    if !configured.is_empty() {
        return configured.to_vec();
    }
    vec![DEFAULT_PROFILE.to_string()]
}
