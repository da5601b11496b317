#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! deface-wrap — anonymize faces in a video by delegating to `deface`.

mod cli;
mod commands;
mod exitcode;
mod invocation;
mod runner;
mod types;

use clap::Parser;
use clap::error::ErrorKind;

use cli::logging::setup_logging;
use cli::{Cli, OutputCtx, write_error};
use types::ErrorOutput;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exitcode::OK,
                _ => exitcode::USAGE,
            };
            // Help/version go to stdout, everything else (with usage) to stderr.
            let _ = err.print();
            std::process::exit(code);
        }
    };

    setup_logging(cli.debug);

    let ctx = OutputCtx::new(cli.output, cli.json);

    match commands::dispatch(&cli, &ctx) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            tracing::debug!(error = ?err, "wrapper failed");
            let error_output = ErrorOutput::from_wrap_error(&err);
            write_error(&error_output, cli.output, cli.json);
            std::process::exit(err.exit_code());
        }
    }
}
