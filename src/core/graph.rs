//! core::graph
//!
//! Branch lineage derived from base links.
//!
//! # Architecture
//!
//! Each stored branch has at most one base, so base links form a functional
//! graph over branch names:
//! - Nodes are stored branches
//! - Edges point from a branch to its base (when the base is stored)
//! - A branch whose base is absent or not stored is a root
//!
//! # Invariants
//!
//! - No branch may reach itself by following base links. This is not enforced
//!   on write; traversals fail with [`ConsistencyError::Cycle`] instead of
//!   looping.

use std::collections::{HashMap, HashSet};

use super::metadata::{BranchEntity, BranchStore};
use super::verify::ConsistencyError;

/// Parent and children maps over all stored branches.
#[derive(Debug, Default)]
pub struct BranchGraph {
    /// Resolved base for each stored branch; `None` for roots.
    parents: HashMap<String, Option<String>>,
    /// Dependents of each base, sorted by name.
    children: HashMap<String, Vec<String>>,
}

impl BranchGraph {
    /// Build the graph from a store.
    ///
    /// Bases are resolved through [`BranchStore::find`], so a base recorded
    /// as an alias still links to the right branch.
    pub fn build(store: &BranchStore) -> Self {
        let mut graph = Self::default();

        for entity in store.iter() {
            let parent = entity
                .base
                .as_deref()
                .and_then(|base| store.find(base))
                .map(|base| base.name.clone());

            if let Some(parent) = &parent {
                graph
                    .children
                    .entry(parent.clone())
                    .or_default()
                    .push(entity.name.clone());
            }
            graph.parents.insert(entity.name.clone(), parent);
        }

        for children in graph.children.values_mut() {
            children.sort();
        }
        graph
    }

    /// The stored base of a branch, if it has one.
    pub fn parent(&self, name: &str) -> Option<&str> {
        self.parents.get(name).and_then(|p| p.as_deref())
    }

    /// Branches whose base is `name`, sorted by name.
    pub fn children(&self, name: &str) -> &[String] {
        self.children.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Branches without a stored base, sorted by name.
    pub fn roots(&self) -> Vec<&str> {
        let mut roots: Vec<&str> = self
            .parents
            .iter()
            .filter(|(_, parent)| parent.is_none())
            .map(|(name, _)| name.as_str())
            .collect();
        roots.sort_unstable();
        roots
    }

    /// Find a branch that reaches a repeated name by following parents.
    ///
    /// Returns `(origin, repeated)` for the first origin in sorted order.
    pub fn find_cycle(&self) -> Option<(String, String)> {
        let mut names: Vec<&String> = self.parents.keys().collect();
        names.sort();

        for origin in names {
            let mut visited = HashSet::new();
            visited.insert(origin.as_str());
            let mut current = origin.as_str();
            while let Some(parent) = self.parent(current) {
                if !visited.insert(parent) {
                    return Some((origin.clone(), parent.to_string()));
                }
                current = parent;
            }
        }
        None
    }
}

/// Walk base links from `origin` and return the chain root-first.
///
/// The walk stops at a branch with no base or whose base is not stored. The
/// returned vector ends with `origin` itself.
///
/// # Errors
///
/// Returns [`ConsistencyError::Cycle`] if a base that was already visited is
/// reached again.
///
/// # Example
///
/// ```
/// use git_ass::core::graph::lineage;
/// use git_ass::core::metadata::{BranchStore, BranchUpdate};
///
/// let mut store = BranchStore::new();
/// store.add(BranchUpdate::new("a").base("b"), true).unwrap();
/// store.add(BranchUpdate::new("b").base("c"), true).unwrap();
/// store.add(BranchUpdate::new("c"), true).unwrap();
///
/// let a = store.get("a").unwrap();
/// let names: Vec<_> = lineage(&store, a).unwrap().iter().map(|e| e.name.as_str()).collect();
/// assert_eq!(names, vec!["c", "b", "a"]);
/// ```
pub fn lineage<'s>(
    store: &'s BranchStore,
    origin: &'s BranchEntity,
) -> Result<Vec<&'s BranchEntity>, ConsistencyError> {
    let mut chain = vec![origin];
    let mut visited: HashSet<&str> = HashSet::new();
    visited.insert(origin.name.as_str());

    let mut current = origin;
    while let Some(base) = current.base.as_deref().filter(|b| !b.is_empty()) {
        let next = match store.find(base) {
            Some(next) => next,
            None => break,
        };
        if !visited.insert(next.name.as_str()) {
            return Err(ConsistencyError::Cycle {
                origin: origin.name.clone(),
                repeated: next.name.clone(),
            });
        }
        chain.push(next);
        current = next;
    }

    chain.reverse();
    Ok(chain)
}
