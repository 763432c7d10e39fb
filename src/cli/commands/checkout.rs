//! checkout command - Check out a branch by name or alias

use crate::core::verify::require_branch;
use crate::engine::Context;
use crate::git::RunOptions;
use anyhow::Result;

use super::target_key;

/// Check out the branch stored under `branch`.
pub fn checkout(ctx: &Context, branch: Option<&str>) -> Result<()> {
    let (_, store) = ctx.open_metadata()?;
    let key = target_key(ctx, branch)?;
    let entity = require_branch(&store, &key)?;

    ctx.git()
        .run(&["checkout", entity.name.as_str()], RunOptions::default())?;
    Ok(())
}
