//! purge command - Delete merged local branches

use std::io::{self, Write};

use crate::engine::{purge, Context, PurgeOutcome, PurgeReport};
use crate::ui::output::{self, Verbosity};
use anyhow::Result;

/// Delete every fully merged local branch except the current one.
pub fn purge(ctx: &Context) -> Result<()> {
    let verbosity = ctx.verbosity();
    output::print("Purge local branches:", verbosity);

    for report in purge::purge(&ctx.git())? {
        write_report(
            &report,
            verbosity,
            &mut io::stdout().lock(),
            &mut io::stderr().lock(),
        )?;
    }
    Ok(())
}

/// Write one report line, followed by Git's stderr on failure.
///
/// Nothing is written in quiet mode.
fn write_report(
    report: &PurgeReport,
    verbosity: Verbosity,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    if verbosity == Verbosity::Quiet {
        return Ok(());
    }
    match &report.outcome {
        PurgeOutcome::Deleted => writeln!(out, "- {} - ok", report.branch),
        PurgeOutcome::NotFullyMerged => {
            writeln!(out, "- {} - not fully merged, skipped", report.branch)
        }
        PurgeOutcome::Failed(stderr) => {
            writeln!(out, "- {} - error", report.branch)?;
            out.flush()?;
            writeln!(err, "{}", stderr.trim_end())
        }
    }
}
