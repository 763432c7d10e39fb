//! cli
//!
//! Command-line interface layer for git-ass.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Resolve settings (flags, environment, config file) into a [`Context`]
//! - Delegate to command handlers
//! - Apply the `--silent` policy to the final error
//!
//! # Silent Policy
//!
//! With `--silent`, an error whose chain contains a failed git command, a
//! consistency error (unknown branch, unknown base, lineage cycle) or a
//! duplicate add ends the process cleanly with no output. Everything else
//! (I/O, parse, config, upstream mismatch after push) is still reported.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use tracing::debug;

use crate::core::config::Config;
use crate::core::metadata::StoreError;
use crate::core::verify::ConsistencyError;
use crate::engine::Context;
use crate::git::GitError;

/// Environment variable overriding the metadata document path.
pub const DATA_ENV: &str = "GIT_ASS_DATA";

/// Environment variable enabling the git command echo.
pub const DEBUG_ENV: &str = "DEBUG";

/// Settings read from the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    /// `GIT_ASS_DATA`, when set and non-empty.
    pub data_file: Option<PathBuf>,
    /// `DEBUG` is set to a non-empty value.
    pub debug: bool,
}

impl EnvOverrides {
    /// Read overrides from the process environment.
    pub fn from_env() -> Self {
        let non_empty = |key: &str| std::env::var_os(key).filter(|v| !v.is_empty());
        Self {
            data_file: non_empty(DATA_ENV).map(PathBuf::from),
            debug: non_empty(DEBUG_ENV).is_some(),
        }
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let silent = cli.silent;

    match execute(cli) {
        Err(err) if silent && is_expected_failure(&err) => {
            debug!(error = %format!("{:#}", err), "suppressed by --silent");
            Ok(())
        }
        other => other,
    }
}

fn execute(cli: Cli) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let ctx = build_context(&cli, &config, &EnvOverrides::from_env())?;
    commands::dispatch(cli.command, &ctx)
}

/// Resolve the execution context.
///
/// Precedence: CLI flags, then environment, then config file, then defaults.
pub fn build_context(cli: &Cli, config: &Config, env: &EnvOverrides) -> Result<Context> {
    let cwd = match &cli.cwd {
        Some(path) => path.clone(),
        None => std::env::current_dir().context("Failed to read the working directory")?,
    };

    let data_file = match cli.data_file.clone().or_else(|| env.data_file.clone()) {
        Some(path) => path,
        None => config.data_file()?,
    };

    let mut ctx = Context::new(cwd, data_file);
    ctx.remote = config.remote().to_string();
    ctx.git_program = config.git_program().to_string();
    ctx.debug = cli.debug || env.debug || config.debug();
    ctx.quiet = cli.quiet;
    ctx.silent = cli.silent;

    debug!(
        scope = %ctx.scope,
        data_file = %ctx.data_file.display(),
        config = ?config.loaded_from(),
        "resolved context"
    );
    Ok(ctx)
}

/// Whether `err` is a failure that `--silent` hides.
pub fn is_expected_failure(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<GitError>(),
            Some(GitError::CommandFailed { .. })
        ) || cause.downcast_ref::<ConsistencyError>().is_some()
            || matches!(
                cause.downcast_ref::<StoreError>(),
                Some(StoreError::Duplicate(_))
            )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::UpstreamMismatch;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("git-ass").chain(args.iter().copied())).unwrap()
    }

    fn config_with_data_file(path: &str) -> Config {
        let mut config = Config::default();
        config.global.data_file = Some(PathBuf::from(path));
        config
    }

    #[test]
    fn flag_beats_env_beats_config() {
        let config = config_with_data_file("/config.json");
        let env = EnvOverrides {
            data_file: Some(PathBuf::from("/env.json")),
            debug: false,
        };

        let ctx = build_context(
            &cli(&["--cwd", "/repo", "--data-file", "/flag.json", "list"]),
            &config,
            &env,
        )
        .unwrap();
        assert_eq!(ctx.data_file, PathBuf::from("/flag.json"));

        let ctx = build_context(&cli(&["--cwd", "/repo", "list"]), &config, &env).unwrap();
        assert_eq!(ctx.data_file, PathBuf::from("/env.json"));

        let ctx = build_context(
            &cli(&["--cwd", "/repo", "list"]),
            &config,
            &EnvOverrides::default(),
        )
        .unwrap();
        assert_eq!(ctx.data_file, PathBuf::from("/config.json"));
        assert_eq!(ctx.scope, "/repo");
    }

    #[test]
    fn debug_from_any_source() {
        let config = config_with_data_file("/d.json");
        let env = EnvOverrides {
            data_file: None,
            debug: true,
        };
        let ctx = build_context(&cli(&["--cwd", "/repo", "list"]), &config, &env).unwrap();
        assert!(ctx.debug);

        let ctx = build_context(
            &cli(&["--cwd", "/repo", "--debug", "list"]),
            &config,
            &EnvOverrides::default(),
        )
        .unwrap();
        assert!(ctx.debug);

        let ctx = build_context(
            &cli(&["--cwd", "/repo", "list"]),
            &config,
            &EnvOverrides::default(),
        )
        .unwrap();
        assert!(!ctx.debug);
    }

    #[test]
    fn expected_failures() {
        let not_found = anyhow::Error::new(ConsistencyError::BranchNotFound("x".into()));
        assert!(is_expected_failure(&not_found));

        let git = anyhow::Error::new(GitError::CommandFailed {
            program: "git".into(),
            args: vec!["fetch".into()],
            code: Some(1),
            stderr: String::new(),
        })
        .context("Failed to fetch");
        assert!(is_expected_failure(&git));

        let duplicate = anyhow::Error::new(StoreError::Duplicate("x".into()));
        assert!(is_expected_failure(&duplicate));
    }

    #[test]
    fn unexpected_failures() {
        let parse = anyhow::Error::new(StoreError::Parse {
            path: PathBuf::from("/d.json"),
            message: "bad".into(),
        });
        assert!(!is_expected_failure(&parse));

        let spawn = anyhow::Error::new(GitError::Spawn {
            program: "git".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        });
        assert!(!is_expected_failure(&spawn));

        let mismatch = anyhow::Error::new(UpstreamMismatch {
            upstream: "refs/remotes/origin/main".into(),
        });
        assert!(!is_expected_failure(&mismatch));
    }
}
