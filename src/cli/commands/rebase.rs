//! rebase command - Rebase onto the remote base

use crate::core::verify::require_branch;
use crate::engine::Context;
use crate::git::RunOptions;
use anyhow::Result;

/// Fetch, then rebase the current branch onto `<remote>/<base>`.
///
/// A branch without a base is rebased onto its own remote counterpart.
pub fn rebase(ctx: &Context) -> Result<()> {
    let (_, store) = ctx.open_metadata()?;
    let git = ctx.git();
    let current = git.current_branch()?;
    let entity = require_branch(&store, &current)?;

    let onto = format!(
        "{}/{}",
        ctx.remote,
        entity.base.as_deref().unwrap_or(&entity.name)
    );

    git.run(&["fetch"], RunOptions::default())?;
    git.run(&["rebase", onto.as_str()], RunOptions::default())?;
    Ok(())
}
