//! git-ass binary entry point.

use std::process::ExitCode;

use git_ass::{cli, logging, ui::output};

fn main() -> ExitCode {
    logging::init();

    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
