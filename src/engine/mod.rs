//! engine
//!
//! Per-invocation context and reconciliation against live Git state.
//!
//! # Architecture
//!
//! A git-ass invocation is short and strictly sequential: at most one
//! metadata load, a series of blocking `git` invocations, and at most one
//! persist. The [`Context`] carries everything resolved at startup (working
//! directory, scope key, document path, remote, executable, flags) and is
//! passed explicitly to every command handler.
//!
//! - [`scan`] - Read the live local/remote branch sets
//! - [`prune`] - Drop metadata for branches that no longer exist
//! - [`purge`] - Delete merged local branches (metadata untouched)
//!
//! # Example
//!
//! ```ignore
//! use git_ass::engine::{prune, Context};
//!
//! let ctx = Context::new(repo_dir, data_file);
//! let (mut file, mut store) = ctx.open_metadata()?;
//! let plan = prune::prune(&ctx.git(), &mut store)?;
//! if !plan.is_empty() {
//!     file.persist(&ctx.scope, &store)?;
//! }
//! ```

pub mod prune;
pub mod purge;
pub mod scan;

pub use prune::PrunePlan;
pub use purge::{PurgeOutcome, PurgeReport};
pub use scan::{scan, LiveBranches};

use std::path::PathBuf;

use crate::core::config::DEFAULT_REMOTE;
use crate::core::metadata::{BranchStore, MetadataFile, StoreError};
use crate::core::paths::scope_key;
use crate::git::{Git, DEFAULT_PROGRAM};
use crate::ui::output::Verbosity;

/// Execution context for commands.
///
/// Contains settings resolved from CLI flags, environment and config.
#[derive(Debug, Clone)]
pub struct Context {
    /// Absolute working directory; git runs here.
    pub cwd: PathBuf,
    /// Scope key selecting this repository's slice of the document.
    pub scope: String,
    /// Location of the shared metadata document.
    pub data_file: PathBuf,
    /// Remote used by `rebase`.
    pub remote: String,
    /// Git executable.
    pub git_program: String,
    /// Echo git invocations to stderr.
    pub debug: bool,
    /// Minimal output.
    pub quiet: bool,
    /// Exit cleanly on expected failures.
    pub silent: bool,
}

impl Context {
    /// Context for `cwd` with default settings.
    ///
    /// `cwd` should be absolute; a relative path is resolved against the
    /// process working directory for the scope key.
    pub fn new(cwd: PathBuf, data_file: PathBuf) -> Self {
        let base = std::env::current_dir().unwrap_or_default();
        let cwd = if cwd.is_absolute() { cwd } else { base.join(cwd) };
        Self {
            scope: scope_key(&cwd, &base),
            cwd,
            data_file,
            remote: DEFAULT_REMOTE.to_string(),
            git_program: DEFAULT_PROGRAM.to_string(),
            debug: false,
            quiet: false,
            silent: false,
        }
    }

    /// Git handle for this invocation.
    pub fn git(&self) -> Git {
        Git::new(Some(self.cwd.clone()))
            .program(self.git_program.clone())
            .echo(self.debug)
    }

    /// Open the metadata document and load this scope's store.
    pub fn open_metadata(&self) -> Result<(MetadataFile, BranchStore), StoreError> {
        let file = MetadataFile::open(&self.data_file)?;
        let store = file.load(&self.scope)?;
        Ok((file, store))
    }

    /// Output verbosity.
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_quiet(self.quiet)
    }
}
