//! # xmlcfg CLI
//!
//! This is the binary entry point for the `xmlcfg` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`, with hidden flags applied.
//! - Setting up logging.
//! - Running the configuration flow and translating failures into a
//!   diagnostic and an exit code: 2 for command-line misuse, 1 otherwise.
//!
//! The core logic is defined in the `lib.rs` library crate, so the binary is
//! a thin wrapper around the reusable library functionality.

mod cli;
mod commands;

use std::ffi::OsString;
use std::process::ExitCode;

use xmlcfg::error::Error;

fn main() -> ExitCode {
    let args: Vec<OsString> = std::env::args_os().collect();
    let app_name = cli::app_name(&args);

    let visibility = match cli::default_visibility() {
        Ok(visibility) => visibility,
        Err(e) => {
            eprintln!("{}: {}", app_name, e);
            return ExitCode::from(1);
        }
    };

    let cli = cli::Cli::parse_with_visibility(&args, &visibility);
    cli.init_logging();

    match cli.execute(&app_name, args.len(), &visibility) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", app_name, e);
            let usage = e.downcast_ref::<Error>().is_some_and(Error::is_usage);
            ExitCode::from(if usage { 2 } else { 1 })
        }
    }
}
