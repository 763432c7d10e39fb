//! git::runner
//!
//! Process seam for the Git interface.
//!
//! [`CommandRunner`] is the only place where a child process is spawned.
//! [`crate::git::Git`] layers argument handling, success checks and output
//! parsing on top of it, and tests substitute [`crate::git::mock::ScriptedRunner`].

use std::fmt;
use std::io;
use std::path::Path;
use std::process::Command;

/// Outcome of one child process invocation.
///
/// `stdout` and `stderr` are empty when output was not captured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
    /// Exit code, `None` if the process was terminated by a signal.
    pub code: Option<i32>,
}

impl CommandOutput {
    /// A successful invocation with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            code: Some(0),
        }
    }

    /// A failed invocation with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            code: Some(code),
        }
    }

    /// Whether the process exited with status 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Spawns a program and waits for it to exit.
pub trait CommandRunner: fmt::Debug {
    /// Run `program` with `args`, blocking until it exits.
    ///
    /// When `capture` is false the child inherits stdout/stderr and the
    /// returned output strings are empty.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the process could not be started.
    fn execute(
        &self,
        program: &str,
        args: &[String],
        cwd: Option<&Path>,
        capture: bool,
    ) -> io::Result<CommandOutput>;
}

/// Runner backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn execute(
        &self,
        program: &str,
        args: &[String],
        cwd: Option<&Path>,
        capture: bool,
    ) -> io::Result<CommandOutput> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        if capture {
            let output = cmd.output()?;
            Ok(CommandOutput {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                code: output.status.code(),
            })
        } else {
            let status = cmd.status()?;
            Ok(CommandOutput {
                stdout: String::new(),
                stderr: String::new(),
                code: status.code(),
            })
        }
    }
}
