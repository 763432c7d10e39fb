//! logging
//!
//! Diagnostic tracing for git-ass.
//!
//! Tracing output is for diagnosing the tool itself and goes to stderr. It is
//! independent of the `DEBUG` command echo done by [`crate::git::Git`], which
//! is a user-facing feature.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber.
///
/// Reads `RUST_LOG`; defaults to `warn` when unset or invalid.
///
/// ```bash
/// RUST_LOG=git_ass=debug git-ass list
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Already initialized in this process: keep the existing subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .try_init();
}
