//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Loads this scope's metadata through the [`Context`]
//! 2. Resolves the target branch (argument, or the checked-out branch)
//! 3. Calls into `core`/`engine` and prints the result
//! 4. Persists the store if it changed
//!
//! Handlers return `anyhow::Result`; typed errors from lower layers stay in
//! the error chain so the caller can apply the `--silent` policy.

mod add;
mod checkout;
mod completion;
mod find;
mod info;
mod list;
mod prune;
mod purge;
mod push;
mod rebase;
mod remove;

// Re-export command functions for testing and direct invocation
pub use add::{add, AddArgs};
pub use checkout::checkout;
pub use completion::completion;
pub use find::find;
pub use info::info;
pub use list::list;
pub use prune::prune;
pub use purge::purge;
pub use push::{push, UpstreamMismatch};
pub use rebase::rebase;
pub use remove::remove;

use crate::cli::args::Command;
use crate::engine::Context;
use anyhow::{Context as _, Result};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Info { property, branch } => info::info(ctx, property, branch.as_deref()),
        Command::Add {
            base,
            alias,
            description,
            branch,
        } => add::add(
            ctx,
            AddArgs {
                branch: branch.as_deref(),
                base: base.as_deref(),
                alias: alias.as_deref(),
                description: description.as_deref(),
            },
        ),
        Command::Find { branch } => find::find(ctx, branch.as_deref()),
        Command::Remove { branch } => remove::remove(ctx, branch.as_deref()),
        Command::Rebase => rebase::rebase(ctx),
        Command::List => list::list(ctx),
        Command::Checkout { branch } => checkout::checkout(ctx, branch.as_deref()),
        Command::Prune => prune::prune(ctx),
        Command::Purge => purge::purge(ctx),
        Command::Push { args } => push::push(ctx, &args),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// The branch a command targets: the argument, or the checked-out branch.
fn target_key(ctx: &Context, branch: Option<&str>) -> Result<String> {
    match branch {
        Some(key) => Ok(key.to_string()),
        None => ctx
            .git()
            .current_branch()
            .context("Failed to determine the current branch"),
    }
}
