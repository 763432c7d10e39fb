//! git::mock
//!
//! Scripted command runner for deterministic testing.
//!
//! Responses are registered per exact argument vector. Every invocation is
//! recorded so tests can assert on what was run. An invocation with no
//! registered response fails with exit code 128, like Git does for an unknown
//! command.
//!
//! # Example
//!
//! ```
//! use git_ass::git::mock::ScriptedRunner;
//! use git_ass::git::{CommandOutput, Git};
//!
//! let runner = ScriptedRunner::new()
//!     .respond(&["rev-parse", "--abbrev-ref", "@"], CommandOutput::ok("main\n"));
//! let git = Git::with_runner(runner.clone());
//!
//! assert_eq!(git.current_branch().unwrap(), "main");
//! assert_eq!(runner.calls().len(), 1);
//! ```

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use super::runner::{CommandOutput, CommandRunner};

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Argument vector (without the program).
    pub args: Vec<String>,
    /// Whether output capture was requested.
    pub capture: bool,
}

/// Scripted runner.
///
/// Thread-safe via internal `Arc<Mutex<...>>`; clones share state, so a test
/// can keep a clone to inspect calls after handing one to [`super::Git`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedRunner {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    responses: HashMap<Vec<String>, CommandOutput>,
    calls: Vec<RecordedCall>,
}

impl ScriptedRunner {
    /// Create a runner with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the output returned for exactly `args`.
    pub fn respond(self, args: &[&str], output: CommandOutput) -> Self {
        let key = args.iter().map(|a| a.to_string()).collect();
        self.lock().responses.insert(key, output);
        self
    }

    /// All invocations so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().calls.clone()
    }

    /// Whether an invocation with exactly `args` happened.
    pub fn was_called(&self, args: &[&str]) -> bool {
        self.lock()
            .calls
            .iter()
            .any(|c| c.args.iter().map(String::as_str).eq(args.iter().copied()))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A panic in another test thread must not cascade into this one.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl CommandRunner for ScriptedRunner {
    fn execute(
        &self,
        _program: &str,
        args: &[String],
        _cwd: Option<&Path>,
        capture: bool,
    ) -> io::Result<CommandOutput> {
        let mut inner = self.lock();
        inner.calls.push(RecordedCall {
            args: args.to_vec(),
            capture,
        });
        let output = inner.responses.get(args).cloned().unwrap_or_else(|| {
            CommandOutput::failed(128, format!("unscripted command: {}", args.join(" ")))
        });
        Ok(output)
    }
}
