//! git::interface
//!
//! Git interface implementation on top of the `git` executable.
//!
//! All Git interaction in git-ass is done by invoking the external `git`
//! program and parsing its plain-text output. This module provides the
//! [`Git`] type which wraps those invocations with uniform success checks,
//! optional command echo and typed errors.
//!
//! # Invocation modes
//!
//! - [`Git::run`] - raw invocation; captures output only when asked, and
//!   fails with [`GitError::CommandFailed`] on a non-zero exit when the
//!   options require success
//! - [`Git::read`] - captured, must succeed, returns trimmed stdout
//! - [`Git::test`] - captured probe; a non-zero exit becomes `Ok(false)`
//!
//! # Example
//!
//! ```ignore
//! use git_ass::git::Git;
//!
//! let git = Git::new(None);
//! let current = git.current_branch()?;
//! let listing = git.list_branches(&["-r"])?;
//! println!("{} of {} remote branches", current, listing.names.len());
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use super::runner::{CommandOutput, CommandRunner, SystemRunner};

/// Default executable name.
pub const DEFAULT_PROGRAM: &str = "git";

/// Errors from Git invocations.
#[derive(Debug, Error)]
pub enum GitError {
    /// The process exited non-zero where success was required.
    #[error("command failed: {program} {}", .args.join(" "))]
    CommandFailed {
        /// The executable that was invoked
        program: String,
        /// The argument vector
        args: Vec<String>,
        /// Exit code (`None` when killed by a signal)
        code: Option<i32>,
        /// Captured stderr, empty when output was not captured
        stderr: String,
    },

    /// The process could not be started at all.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// The executable that was invoked
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Options for a single [`Git::run`] invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Capture stdout/stderr instead of inheriting the terminal.
    pub capture: bool,
    /// Treat a non-zero exit as [`GitError::CommandFailed`].
    pub must_succeed: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            capture: false,
            must_succeed: true,
        }
    }
}

impl RunOptions {
    /// Capture output.
    pub fn captured(mut self) -> Self {
        self.capture = true;
        self
    }

    /// Report a non-zero exit as a value instead of an error.
    pub fn tolerant(mut self) -> Self {
        self.must_succeed = false;
        self
    }
}

/// Parsed output of `git branch`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchListing {
    /// The checked-out branch, if any line carried the `* ` marker.
    pub current: Option<String>,
    /// All listed branch names.
    pub names: BTreeSet<String>,
}

impl BranchListing {
    /// Parse `git branch` output.
    ///
    /// Every non-blank line is a two-character marker (`"* "` for the
    /// checked-out branch, two spaces otherwise) followed by the name.
    ///
    /// # Example
    ///
    /// ```
    /// use git_ass::git::BranchListing;
    ///
    /// let listing = BranchListing::parse("  feature/x\n* main\n\n");
    /// assert_eq!(listing.current.as_deref(), Some("main"));
    /// assert!(listing.names.contains("feature/x"));
    /// assert_eq!(listing.names.len(), 2);
    /// ```
    pub fn parse(stdout: &str) -> Self {
        let mut listing = Self::default();
        for line in stdout.split('\n') {
            if line.trim().is_empty() {
                continue;
            }
            let name = match line.char_indices().nth(2) {
                Some((idx, _)) => line[idx..].trim(),
                None => "",
            };
            if name.is_empty() {
                continue;
            }
            if line.starts_with("* ") {
                listing.current = Some(name.to_string());
            }
            listing.names.insert(name.to_string());
        }
        listing
    }
}

/// Handle for invoking Git in one working directory.
#[derive(Debug)]
pub struct Git {
    program: String,
    cwd: Option<PathBuf>,
    echo: bool,
    runner: Box<dyn CommandRunner>,
}

impl Git {
    /// Create a Git handle that runs the system `git` in `cwd`
    /// (or the process working directory when `None`).
    pub fn new(cwd: Option<PathBuf>) -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            cwd,
            echo: false,
            runner: Box::new(SystemRunner),
        }
    }

    /// Create a Git handle over a custom runner.
    pub fn with_runner(runner: impl CommandRunner + 'static) -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            cwd: None,
            echo: false,
            runner: Box::new(runner),
        }
    }

    /// Use a different executable.
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Echo each argument vector to stderr before running it.
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// The working directory commands run in, if overridden.
    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Invoke Git with `args`.
    ///
    /// # Errors
    ///
    /// - [`GitError::Spawn`] if the executable cannot be started
    /// - [`GitError::CommandFailed`] on a non-zero exit when
    ///   `opts.must_succeed` is set
    pub fn run<S: AsRef<str>>(
        &self,
        args: &[S],
        opts: RunOptions,
    ) -> Result<CommandOutput, GitError> {
        let args: Vec<String> = args.iter().map(|a| a.as_ref().to_string()).collect();

        if self.echo {
            eprintln!("$ {} {}", self.program, args.join(" "));
        }

        let output = self
            .runner
            .execute(&self.program, &args, self.cwd.as_deref(), opts.capture)
            .map_err(|source| GitError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        debug!(?args, code = ?output.code, "git invocation finished");

        if opts.must_succeed && !output.success() {
            return Err(GitError::CommandFailed {
                program: self.program.clone(),
                args,
                code: output.code,
                stderr: output.stderr,
            });
        }
        Ok(output)
    }

    /// Run with captured output, require success, return trimmed stdout.
    pub fn read<S: AsRef<str>>(&self, args: &[S]) -> Result<String, GitError> {
        let output = self.run(args, RunOptions::default().captured())?;
        Ok(output.stdout.trim().to_string())
    }

    /// Run as a probe: `Ok(true)` on success, `Ok(false)` on a non-zero exit.
    ///
    /// Only [`GitError::CommandFailed`] is converted; a spawn failure still
    /// propagates so a missing executable is not mistaken for "no".
    pub fn test<S: AsRef<str>>(&self, args: &[S]) -> Result<bool, GitError> {
        match self.run(args, RunOptions::default().captured()) {
            Ok(_) => Ok(true),
            Err(GitError::CommandFailed { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// List branches with `git branch <extra_args>`.
    ///
    /// Output is parsed untrimmed so the first line keeps its marker columns.
    pub fn list_branches(&self, extra_args: &[&str]) -> Result<BranchListing, GitError> {
        let mut args = vec!["branch"];
        args.extend_from_slice(extra_args);
        let output = self.run(&args, RunOptions::default().captured())?;
        Ok(BranchListing::parse(&output.stdout))
    }

    /// Name of the checked-out branch (`rev-parse --abbrev-ref @`).
    pub fn current_branch(&self) -> Result<String, GitError> {
        self.read(&["rev-parse", "--abbrev-ref", "@"])
    }

    /// Full ref name of the upstream of the checked-out branch.
    pub fn upstream_ref(&self) -> Result<String, GitError> {
        self.read(&["rev-parse", "--symbolic-full-name", "@{u}"])
    }
}
