//! engine::purge
//!
//! Delete local branches that are fully merged.
//!
//! Every local branch except the checked-out one gets a non-forced
//! `git branch -d`. Git refuses to delete unmerged branches; that refusal is
//! reported as [`PurgeOutcome::NotFullyMerged`] rather than as an error. Any
//! other failure is reported with Git's stderr. Metadata is never touched.

use tracing::info;

use crate::git::{CommandOutput, Git, GitError, RunOptions};

/// Text Git prints when refusing to delete an unmerged branch.
pub const NOT_FULLY_MERGED: &str = "is not fully merged";

/// Result of trying to delete one branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurgeOutcome {
    /// The branch was deleted.
    Deleted,
    /// Git refused because the branch has unmerged commits; skipped.
    NotFullyMerged,
    /// Deletion failed for another reason; carries Git's stderr.
    Failed(String),
}

/// Outcome for one branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeReport {
    pub branch: String,
    pub outcome: PurgeOutcome,
}

/// Classify the output of a tolerant `git branch -d`.
pub fn classify(output: &CommandOutput) -> PurgeOutcome {
    if output.success() {
        PurgeOutcome::Deleted
    } else if output.stderr.contains(NOT_FULLY_MERGED) {
        PurgeOutcome::NotFullyMerged
    } else {
        PurgeOutcome::Failed(output.stderr.clone())
    }
}

/// Try to delete every local branch except the current one, in name order.
///
/// # Errors
///
/// Fails only if listing branches fails or Git cannot be started; per-branch
/// failures are reported in the returned list.
pub fn purge(git: &Git) -> Result<Vec<PurgeReport>, GitError> {
    let listing = git.list_branches(&[])?;
    let mut reports = Vec::new();

    for branch in &listing.names {
        if listing.current.as_ref() == Some(branch) {
            continue;
        }
        let output = git.run(
            &["branch", "-d", branch.as_str()],
            RunOptions::default().captured().tolerant(),
        )?;
        let outcome = classify(&output);
        info!(branch = %branch, ?outcome, "purge");
        reports.push(PurgeReport {
            branch: branch.clone(),
            outcome,
        });
    }

    Ok(reports)
}
