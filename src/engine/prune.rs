//! engine::prune
//!
//! Reconcile stored metadata with the branches that still exist.
//!
//! # Classification
//!
//! - A stored name containing `/` is treated as a local branch and is
//!   missing when it is not in the live local set.
//! - Any other stored name is treated as a remote-tracking branch and is
//!   missing when it is not in the live remote set (prefix stripped).
//!
//! Missing branches are removed. Remaining branches whose base is being
//! removed keep their entry but lose the base link.
//!
//! # Invariants
//!
//! - Nothing is changed when no branch is missing
//! - A branch is never both removed and reported under "drop base"

use std::collections::BTreeSet;

use tracing::info;

use super::scan::{scan, LiveBranches};
use crate::core::metadata::BranchStore;
use crate::git::{Git, GitError, RunOptions};

/// Changes computed by a prune.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrunePlan {
    /// Branches whose metadata is removed.
    pub remove: BTreeSet<String>,
    /// Remaining branches whose base link is cleared.
    pub drop_base: BTreeSet<String>,
}

impl PrunePlan {
    /// Compute the plan for `store` against a live snapshot.
    pub fn compute(store: &BranchStore, live: &LiveBranches) -> Self {
        let remove: BTreeSet<String> = store
            .iter()
            .filter(|entity| {
                if entity.name.contains('/') {
                    !live.local.contains(&entity.name)
                } else {
                    !live.remote.contains(&entity.name)
                }
            })
            .map(|entity| entity.name.clone())
            .collect();

        let drop_base = store
            .iter()
            .filter(|entity| !remove.contains(&entity.name))
            .filter(|entity| entity.base.as_deref().is_some_and(|base| remove.contains(base)))
            .map(|entity| entity.name.clone())
            .collect();

        Self { remove, drop_base }
    }

    /// Whether there is nothing to prune.
    pub fn is_empty(&self) -> bool {
        self.remove.is_empty()
    }

    /// Apply the plan to `store`. A plan with nothing to remove is a no-op.
    pub fn apply(&self, store: &mut BranchStore) {
        if self.is_empty() {
            return;
        }
        for name in &self.remove {
            info!(branch = %name, "pruning branch metadata");
            store.remove(name);
        }
        for name in &self.drop_base {
            info!(branch = %name, "dropping base of pruned branch");
            store.clear_base(name);
        }
    }
}

/// Fetch with pruning, scan live branches, and prune `store` in memory.
///
/// The caller persists the store when the returned plan is not empty.
pub fn prune(git: &Git, store: &mut BranchStore) -> Result<PrunePlan, GitError> {
    git.run(&["fetch", "--all", "--prune"], RunOptions::default())?;
    let live = scan(git)?;
    let plan = PrunePlan::compute(store, &live);
    plan.apply(store);
    Ok(plan)
}
