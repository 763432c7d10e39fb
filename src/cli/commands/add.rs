//! add command - Add or update branch information

use crate::core::metadata::BranchUpdate;
use crate::core::verify::ConsistencyError;
use crate::engine::Context;
use crate::ui::output;
use anyhow::{Context as _, Result};

use super::target_key;

/// Fields given on the command line. `None` leaves a field unchanged.
#[derive(Debug, Default)]
pub struct AddArgs<'a> {
    pub branch: Option<&'a str>,
    pub base: Option<&'a str>,
    pub alias: Option<&'a str>,
    pub description: Option<&'a str>,
}

/// Add a branch or merge new fields into a stored one.
///
/// A non-empty base must resolve by name or alias; the canonical name is
/// stored. An empty base clears it.
pub fn add(ctx: &Context, args: AddArgs<'_>) -> Result<()> {
    let (mut file, mut store) = ctx.open_metadata()?;

    let base = match args.base {
        Some(key) if !key.is_empty() => Some(
            store
                .find(key)
                .map(|b| b.name.clone())
                .ok_or_else(|| ConsistencyError::BaseNotFound(key.to_string()))?,
        ),
        other => other.map(str::to_string),
    };

    let name = target_key(ctx, args.branch)?;
    let update = BranchUpdate {
        name,
        alias: args.alias.map(str::to_string),
        description: args.description.map(str::to_string),
        base,
    };

    let (entity, previous) = store.add(update, true)?;
    let verbosity = ctx.verbosity();
    if previous.is_none() {
        output::print("New branch added:", verbosity);
    } else {
        output::print("Branch updated:", verbosity);
    }
    output::print(&entity, verbosity);

    file.persist(&ctx.scope, &store)
        .context("Failed to save branch metadata")?;
    Ok(())
}
