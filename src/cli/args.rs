//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--data-file <path>`: Use this metadata document
//! - `--debug`: Echo every git invocation to stderr
//! - `--silent` / `-s`: Exit cleanly on expected failures
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::metadata::Property;

/// git-ass - Branch notes, aliases and base tracking for Git
#[derive(Parser, Debug)]
#[command(name = "git-ass")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run as if git-ass was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Path of the metadata document
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Echo git invocations to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Suppress expected errors (missing branch, failed git command)
    #[arg(short, long, global = true)]
    pub silent: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show information of a branch
    #[command(
        name = "info",
        long_about = "Show information of a branch.\n\n\
            Without --property, prints the branch and its ancestors from the root \
            down, one level of indent per generation. With --property, prints only \
            that value (or an empty line when it is not set).",
        after_help = "\
EXAMPLES:
    # Ancestry of the current branch
    git ass info

    # Base of a branch given by alias
    git ass info -p base login"
    )]
    Info {
        /// Print a single property: name, alias, desc or base
        #[arg(short, long)]
        property: Option<Property>,

        /// Name or alias of the branch (defaults to current)
        branch: Option<String>,
    },

    /// Add or update information of a branch
    #[command(
        name = "add",
        visible_alias = "update",
        long_about = "Add or update information of a branch.\n\n\
            Only the given fields change. Pass an empty string to clear a field. \
            The base is looked up by name or alias and must already be stored.",
        after_help = "\
EXAMPLES:
    # Record the current branch with an alias and a base
    git ass add -a login -B develop

    # Change only the description
    git ass update -d \"OAuth login\" login"
    )]
    Add {
        /// Base branch (name or alias)
        #[arg(short = 'B', long)]
        base: Option<String>,

        /// Alias of the branch
        #[arg(short, long)]
        alias: Option<String>,

        /// Description of the branch
        #[arg(short, long)]
        description: Option<String>,

        /// Name of the branch (defaults to current)
        branch: Option<String>,
    },

    /// Print the full name of a branch given by name or alias
    #[command(name = "find", visible_alias = "f")]
    Find {
        /// Name or alias of the branch (defaults to current)
        branch: Option<String>,
    },

    /// Remove information of a branch
    #[command(name = "remove", visible_alias = "rm")]
    Remove {
        /// Name or alias of the branch (defaults to current)
        branch: Option<String>,
    },

    /// Rebase the current branch onto its base on the remote
    #[command(
        name = "rebase",
        long_about = "Fetch, then rebase the current branch onto <remote>/<base>.\n\n\
            A branch without a base is rebased onto its own remote counterpart."
    )]
    Rebase,

    /// List stored branches as a tree
    #[command(name = "list")]
    List,

    /// Check out a branch given by name or alias
    #[command(name = "checkout", visible_alias = "co")]
    Checkout {
        /// Name or alias of the branch
        branch: Option<String>,
    },

    /// Drop metadata of branches that no longer exist
    #[command(
        name = "prune",
        long_about = "Drop metadata of branches that no longer exist.\n\n\
            Runs `git fetch --all --prune` first. Names containing `/` are checked \
            against local branches, other names against remote branches. Branches \
            based on a pruned branch keep their metadata but lose the base."
    )]
    Prune,

    /// Delete local branches that are fully merged
    #[command(name = "purge")]
    Purge,

    /// Push, then check the remote matches the local branch
    #[command(
        name = "push",
        visible_alias = "p",
        long_about = "Push, then check the remote matches the local branch.\n\n\
            Arguments are passed to `git push` unchanged. After pushing, the upstream \
            is fetched and compared with the working tree; any difference is reported \
            as a warning and the command fails.",
        after_help = "\
EXAMPLES:
    git ass push
    git ass push -- -u origin HEAD"
    )]
    Push {
        /// Arguments passed to `git push`
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Generate shell completion scripts
    #[command(name = "completion")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}
