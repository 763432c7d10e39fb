//! prune command - Drop metadata of deleted branches

use crate::engine::{prune, Context};
use crate::ui::output;
use anyhow::{Context as _, Result};

/// Fetch with pruning and drop metadata of branches that no longer exist.
pub fn prune(ctx: &Context) -> Result<()> {
    let (mut file, mut store) = ctx.open_metadata()?;
    let plan = prune::prune(&ctx.git(), &mut store)?;
    let verbosity = ctx.verbosity();

    if plan.is_empty() {
        output::print("No branch to prune", verbosity);
        return Ok(());
    }

    output::print("Prune branches:", verbosity);
    for name in &plan.remove {
        output::print(format!("- {}", name), verbosity);
    }
    if !plan.drop_base.is_empty() {
        output::print("Drop base:", verbosity);
        for name in &plan.drop_base {
            output::print(format!("- {}", name), verbosity);
        }
    }

    file.persist(&ctx.scope, &store)
        .context("Failed to save branch metadata")?;
    Ok(())
}
