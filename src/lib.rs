//! git-ass - a small assistant for local Git branch bookkeeping
//!
//! git-ass keeps a per-repository metadata layer next to Git: every branch can
//! carry a short alias, a free-text description and a declared base branch it
//! was forked from. The bases form a forest of branch lineage that the `info`
//! and `list` commands render, and that `prune` keeps consistent with the
//! branches that actually exist.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to handlers)
//! - [`engine`] - Per-invocation context and reconciliation (scan, prune, purge)
//! - [`core`] - Branch metadata store, lineage graph, configuration
//! - [`git`] - Single interface for invoking the `git` executable
//! - [`ui`] - Output formatting
//!
//! # Invariants
//!
//! 1. At most one branch entity per name, and at most one per alias
//! 2. The alias index always mirrors the entities' alias fields
//! 3. Metadata of other repositories sharing the document is never rewritten

pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod logging;
pub mod ui;
