//! core::verify
//!
//! Consistency checks over branch metadata.
//!
//! # Errors
//!
//! [`ConsistencyError`] covers store invariants that the store does not
//! prevent at write time (a lineage cycle) and lookups a command requires to
//! succeed (a branch or base that is not stored). Both are expected failures:
//! the CLI silences them under `--silent`.
//!
//! # Invariants
//!
//! - Never mutates the store
//! - Must be deterministic

use super::graph::BranchGraph;
use super::metadata::{BranchEntity, BranchStore};
use thiserror::Error;

/// Errors from consistency checks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConsistencyError {
    /// Following base links from `origin` reached `repeated` a second time.
    #[error("cycle detected in branch lineage: {origin} reaches {repeated} twice")]
    Cycle { origin: String, repeated: String },

    /// No branch is stored under this name or alias.
    #[error("branch {0} not found")]
    BranchNotFound(String),

    /// The requested base branch is not stored under this name or alias.
    #[error("base branch {0} not found")]
    BaseNotFound(String),
}

/// Resolve `key` by name or alias, failing if it is not stored.
pub fn require_branch<'s>(
    store: &'s BranchStore,
    key: &str,
) -> Result<&'s BranchEntity, ConsistencyError> {
    store
        .find(key)
        .ok_or_else(|| ConsistencyError::BranchNotFound(key.to_string()))
}

/// Check that no branch reaches itself by following base links.
///
/// Branches are checked in sorted order so the reported cycle is stable.
pub fn verify_acyclic(store: &BranchStore) -> Result<(), ConsistencyError> {
    let graph = BranchGraph::build(store);
    match graph.find_cycle() {
        Some((origin, repeated)) => Err(ConsistencyError::Cycle { origin, repeated }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::BranchUpdate;

    #[test]
    fn require_branch_by_alias() {
        let mut store = BranchStore::new();
        store
            .add(BranchUpdate::new("feature/x").alias("x"), true)
            .unwrap();

        assert_eq!(require_branch(&store, "x").unwrap().name, "feature/x");
        assert_eq!(
            require_branch(&store, "y").unwrap_err(),
            ConsistencyError::BranchNotFound("y".into())
        );
    }

    #[test]
    fn acyclic_store_verifies() {
        let mut store = BranchStore::new();
        store.add(BranchUpdate::new("a").base("b"), true).unwrap();
        store.add(BranchUpdate::new("b").base("main"), true).unwrap();
        assert!(verify_acyclic(&store).is_ok());
    }

    #[test]
    fn cycle_is_reported() {
        let mut store = BranchStore::new();
        store.add(BranchUpdate::new("a").base("b"), true).unwrap();
        store.add(BranchUpdate::new("b").base("a"), true).unwrap();

        let err = verify_acyclic(&store).unwrap_err();
        assert!(matches!(err, ConsistencyError::Cycle { .. }));
    }

    #[test]
    fn self_base_is_a_cycle() {
        let mut store = BranchStore::new();
        store.add(BranchUpdate::new("a").base("a"), true).unwrap();
        assert!(verify_acyclic(&store).is_err());
    }
}
