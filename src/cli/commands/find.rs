//! find command - Resolve a name or alias

use crate::core::verify::require_branch;
use crate::engine::Context;
use anyhow::Result;

use super::target_key;

/// Print the canonical name of the branch stored under `branch`.
pub fn find(ctx: &Context, branch: Option<&str>) -> Result<()> {
    let (_, store) = ctx.open_metadata()?;
    let key = target_key(ctx, branch)?;
    println!("{}", require_branch(&store, &key)?.name);
    Ok(())
}
