//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **only doorway** to Git. Every interaction goes through
//! the `git` executable via [`Git`]; no other module spawns processes or
//! parses Git output.
//!
//! # Responsibilities
//!
//! - Invoking `git` with an argument vector, optionally capturing output
//! - Enforcing success where required ([`GitError::CommandFailed`])
//! - Tolerant probes that report failure as a value ([`Git::test`])
//! - Parsing `git branch` listings ([`BranchListing`])
//! - Echoing invocations when debug echo is enabled
//!
//! # Testing
//!
//! [`runner::CommandRunner`] is the process seam. [`mock::ScriptedRunner`]
//! replaces it in tests so reconciliation logic runs without a repository.

mod interface;
pub mod mock;
pub mod runner;

pub use interface::{BranchListing, Git, GitError, RunOptions, DEFAULT_PROGRAM};
pub use runner::{CommandOutput, CommandRunner, SystemRunner};
