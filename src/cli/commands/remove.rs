//! remove command - Forget a branch

use crate::core::verify::require_branch;
use crate::engine::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};

use super::target_key;

/// Remove the metadata of a branch given by name or alias.
///
/// Only metadata changes; the Git branch is left alone.
pub fn remove(ctx: &Context, branch: Option<&str>) -> Result<()> {
    let (mut file, mut store) = ctx.open_metadata()?;
    let key = target_key(ctx, branch)?;
    let name = require_branch(&store, &key)?.name.clone();

    if let Some(entity) = store.remove(&name) {
        let verbosity = ctx.verbosity();
        output::print("Branch removed:", verbosity);
        output::print(&entity, verbosity);
    }

    file.persist(&ctx.scope, &store)
        .context("Failed to save branch metadata")?;
    Ok(())
}
