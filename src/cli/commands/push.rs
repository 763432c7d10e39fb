//! push command - Push and verify the remote matches

use crate::engine::Context;
use crate::git::RunOptions;
use crate::ui::output;
use anyhow::Result;
use thiserror::Error;

/// The upstream differs from the working tree after a push.
#[derive(Debug, Error)]
#[error("branch differs from upstream {upstream} after push")]
pub struct UpstreamMismatch {
    pub upstream: String,
}

/// Push with pass-through arguments, then compare against the upstream.
///
/// # Errors
///
/// Returns [`UpstreamMismatch`] when `git diff <upstream> --exit-code`
/// reports a difference. This is not an expected failure and is reported
/// even under `--silent`.
pub fn push(ctx: &Context, args: &[String]) -> Result<()> {
    let git = ctx.git();

    let push_args: Vec<&str> = std::iter::once("push")
        .chain(args.iter().map(String::as_str))
        .collect();
    git.run(&push_args, RunOptions::default())?;
    git.run(&["fetch"], RunOptions::default())?;

    let upstream = git.upstream_ref()?;
    let diff = git.run(
        &["diff", upstream.as_str(), "--exit-code"],
        RunOptions::default().captured().tolerant(),
    )?;

    if !diff.success() {
        output::warn(format!(
            "\nYour branch is different from `{}`,\nit is likely that malicious commits are injected.",
            upstream
        ));
        return Err(UpstreamMismatch { upstream }.into());
    }
    Ok(())
}
