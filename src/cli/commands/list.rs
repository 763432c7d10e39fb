//! list command - Show stored branches as a tree

use crate::core::graph::BranchGraph;
use crate::core::verify::verify_acyclic;
use crate::engine::Context;
use crate::ui::output;
use anyhow::Result;

/// Print every stored branch as a tree, marking the checked-out one.
pub fn list(ctx: &Context) -> Result<()> {
    let (_, store) = ctx.open_metadata()?;
    verify_acyclic(&store)?;

    let current = ctx.git().current_branch()?;
    let graph = BranchGraph::build(&store);
    let tree = output::format_tree(&store, &graph, Some(&current));
    if !tree.is_empty() {
        output::print(tree, ctx.verbosity());
    }
    Ok(())
}
