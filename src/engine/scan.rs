//! engine::scan
//!
//! Live branch scanning.
//!
//! # Architecture
//!
//! The scanner lists local branches (`git branch`) and remote-tracking
//! branches (`git branch -r`) and produces a [`LiveBranches`] snapshot. Remote
//! names have their tracking-remote prefix removed (`origin/feature` becomes
//! `feature`) so they compare against stored branch names.
//!
//! # Invariants
//!
//! - Scan is read-only
//! - Scan is deterministic given the same repository state

use std::collections::BTreeSet;

use tracing::debug;

use crate::git::{Git, GitError};

/// Snapshot of the branches Git currently knows about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveBranches {
    /// The checked-out local branch, if any.
    pub current: Option<String>,
    /// Local branch names.
    pub local: BTreeSet<String>,
    /// Remote-tracking branch names with the remote prefix removed.
    pub remote: BTreeSet<String>,
}

/// Scan local and remote branches.
pub fn scan(git: &Git) -> Result<LiveBranches, GitError> {
    let remote = git.list_branches(&["-r"])?;
    let local = git.list_branches(&[])?;

    let live = LiveBranches {
        current: local.current,
        local: local.names,
        remote: strip_remote_prefix(&remote.names),
    };
    debug!(
        local = live.local.len(),
        remote = live.remote.len(),
        "scanned live branches"
    );
    Ok(live)
}

/// Remove everything up to and including the first `/` of each name.
///
/// Names without a `/` carry no branch part and are dropped.
pub fn strip_remote_prefix<'a>(names: impl IntoIterator<Item = &'a String>) -> BTreeSet<String> {
    names
        .into_iter()
        .filter_map(|name| name.split_once('/').map(|(_, rest)| rest))
        .filter(|rest| !rest.is_empty())
        .map(str::to_string)
        .collect()
}
