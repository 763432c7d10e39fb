//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Location
//!
//! Searched in order:
//! 1. `$GIT_ASS_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/git-ass/config.toml`
//! 3. `~/.git-ass/config.toml`
//!
//! # Validation
//!
//! Values are validated after parsing (e.g., the remote must be a bare
//! remote name).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// User configuration.
///
/// # Example
///
/// ```toml
/// data_file = "/home/me/.local/share/git-ass/data.json"
/// remote = "upstream"
/// git = "/usr/local/bin/git"
/// debug = false
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Location of the shared metadata document
    pub data_file: Option<PathBuf>,

    /// Remote that `rebase` rebases onto
    pub remote: Option<String>,

    /// Git executable
    pub git: Option<String>,

    /// Echo every git invocation to stderr
    pub debug: Option<bool>,
}

impl GlobalConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(remote) = &self.remote {
            if remote.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "remote cannot be empty".to_string(),
                ));
            }
            if remote.contains('/') {
                return Err(ConfigError::InvalidValue(format!(
                    "remote '{}' must be a remote name, not a ref",
                    remote
                )));
            }
        }

        if let Some(git) = &self.git {
            if git.trim().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "git executable cannot be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config: GlobalConfig = toml::from_str(
            r#"
            data_file = "/tmp/data.json"
            remote = "upstream"
            git = "git"
            debug = true
            "#,
        )
        .unwrap();
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/data.json")));
        assert_eq!(config.remote.as_deref(), Some("upstream"));
        assert_eq!(config.debug, Some(true));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_config_is_default() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<GlobalConfig, _> = toml::from_str("trunk = \"main\"");
        assert!(result.is_err());
    }

    #[test]
    fn remote_with_slash_rejected() {
        let config = GlobalConfig {
            remote: Some("origin/main".into()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_git_rejected() {
        let config = GlobalConfig {
            git: Some("  ".into()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
