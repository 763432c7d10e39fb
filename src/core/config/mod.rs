//! core::config
//!
//! Configuration schema and loading.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Config file
//! 3. Environment (`GIT_ASS_DATA`, `DEBUG`; applied by the CLI)
//! 4. CLI flags (not handled here)
//!
//! # Config Locations
//!
//! Searched in order:
//! 1. `$GIT_ASS_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/git-ass/config.toml`
//! 3. `~/.git-ass/config.toml`
//!
//! # Example
//!
//! ```no_run
//! use git_ass::core::config::Config;
//!
//! let config = Config::load().unwrap();
//! println!("Remote: {}", config.remote());
//! println!("Git: {}", config.git_program());
//! ```

pub mod schema;

pub use schema::GlobalConfig;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::paths::AppPaths;
use crate::git::DEFAULT_PROGRAM;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "GIT_ASS_CONFIG";

/// Default remote.
pub const DEFAULT_REMOTE: &str = "origin";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("no data directory found; set data_file in the config or pass --data-file")]
    NoDataDir,
}

/// Loaded configuration with accessors that apply defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// File contents
    pub global: GlobalConfig,
    /// Path the config was loaded from (if any)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed or
    /// holds invalid values. A missing file is not an error.
    pub fn load() -> Result<Config, ConfigError> {
        match Self::locate() {
            Some(path) => Self::from_path(&path),
            None => Ok(Config::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn from_path(path: &Path) -> Result<Config, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let global: GlobalConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        global.validate()?;

        Ok(Config {
            global,
            path: Some(path.to_path_buf()),
        })
    }

    /// First existing config file among the standard locations.
    fn locate() -> Option<PathBuf> {
        // 1. Check $GIT_ASS_CONFIG
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/git-ass/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("git-ass/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        // 3. Check ~/.git-ass/config.toml
        dirs::home_dir()
            .map(|home| home.join(".git-ass/config.toml"))
            .filter(|path| path.exists())
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Remote used by `rebase`. Defaults to "origin".
    pub fn remote(&self) -> &str {
        self.global.remote.as_deref().unwrap_or(DEFAULT_REMOTE)
    }

    /// Git executable. Defaults to "git".
    pub fn git_program(&self) -> &str {
        self.global.git.as_deref().unwrap_or(DEFAULT_PROGRAM)
    }

    /// Whether command echo is enabled. Defaults to `false`.
    pub fn debug(&self) -> bool {
        self.global.debug.unwrap_or(false)
    }

    /// Location of the metadata document.
    ///
    /// Uses `data_file` when configured, otherwise the platform data dir.
    pub fn data_file(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.global.data_file {
            return Ok(path.clone());
        }
        AppPaths::platform()
            .map(|paths| paths.data_file())
            .ok_or(ConfigError::NoDataDir)
    }

    /// Path the config was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
