//! info command - Show a branch and its ancestry

use crate::core::graph::lineage;
use crate::core::metadata::Property;
use crate::core::verify::require_branch;
use crate::engine::Context;
use crate::ui::output;
use anyhow::Result;

use super::target_key;

/// Show information of a branch.
///
/// # Arguments
///
/// * `ctx` - Execution context
/// * `property` - Print only this property
/// * `branch` - Name or alias; defaults to the current branch
pub fn info(ctx: &Context, property: Option<Property>, branch: Option<&str>) -> Result<()> {
    let (_, store) = ctx.open_metadata()?;
    let key = target_key(ctx, branch)?;
    let entity = require_branch(&store, &key)?;

    match property {
        Some(property) => println!("{}", entity.property(property)),
        None => {
            let chain = lineage(&store, entity)?;
            output::print(output::format_lineage(&chain), ctx.verbosity());
        }
    }
    Ok(())
}
