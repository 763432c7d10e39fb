//! core::paths
//!
//! Centralized path routing for git-ass storage locations.
//!
//! # Storage Layout
//!
//! All git-ass data lives in one application-data directory:
//! - `data.json` - Branch metadata shared by all repositories, keyed by scope
//!
//! The directory defaults to `<platform data dir>/git-ass` (for example
//! `~/.local/share/git-ass` on Linux) and can be replaced as a whole with
//! [`AppPaths::new`].
//!
//! # Example
//!
//! ```
//! use git_ass::core::paths::AppPaths;
//! use std::path::PathBuf;
//!
//! let paths = AppPaths::new(PathBuf::from("/data/git-ass"));
//! assert_eq!(paths.data_file(), PathBuf::from("/data/git-ass/data.json"));
//! ```

use std::path::{Path, PathBuf};

/// Directory name under the platform data dir.
pub const APP_DIR_NAME: &str = "git-ass";

/// File name of the metadata document.
pub const DATA_FILE_NAME: &str = "data.json";

/// Centralized path routing for git-ass storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// Root application-data directory.
    pub data_dir: PathBuf,
}

impl AppPaths {
    /// Create paths rooted at `data_dir`.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Paths under the platform data directory.
    ///
    /// Returns `None` if the platform has no data directory (no home).
    pub fn platform() -> Option<Self> {
        dirs::data_dir().map(|dir| Self::new(dir.join(APP_DIR_NAME)))
    }

    /// Path to the shared metadata document.
    pub fn data_file(&self) -> PathBuf {
        self.data_dir.join(DATA_FILE_NAME)
    }

    /// Get the data directory as a Path reference.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Scope key for a working directory: its absolute path as text.
///
/// Relative paths are resolved against `base` (normally the process
/// working directory). The path is not canonicalized, so the same
/// repository reached through different symlinks has different scopes.
pub fn scope_key(cwd: &Path, base: &Path) -> String {
    if cwd.is_absolute() {
        cwd.display().to_string()
    } else {
        base.join(cwd).display().to_string()
    }
}
