//! core
//!
//! Core domain types, storage and lineage for git-ass.
//!
//! # Modules
//!
//! - [`metadata`] - Branch entity schema, keyed store, shared document
//! - [`graph`] - Lineage: ancestor walk and parent/children maps
//! - [`verify`] - Consistency errors and checks
//! - [`config`] - Configuration schema and loading
//! - [`paths`] - Centralized path routing for git-ass storage
//!
//! # Design Principles
//!
//! - Nothing in `core` spawns processes; Git access lives in [`crate::git`]
//! - Absent fields stay absent; updates never erase what they don't name
//! - All traversal is deterministic (sorted where order is user-visible)

pub mod config;
pub mod graph;
pub mod metadata;
pub mod paths;
pub mod verify;
