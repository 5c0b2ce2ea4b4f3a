//! `ag_issues` - Per-project issue tracker library
//!
//! This crate provides the command layer for the `ag-issues` CLI. Storage
//! and queries live in the `issues_lib` crate.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Layered configuration (file, environment, flags)
//! - [`error`] - Exit codes and structured error output
//! - [`format`] - Output formatting (text, JSON)
//! - [`logging`] - `tracing` subscriber setup

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;

use std::process::ExitCode;

use clap::Parser;

pub use issues_lib;

/// Run the CLI application.
///
/// This is the main entry point called from `main()`. Errors are printed to
/// stderr (as JSON with `--json`) and mapped to an exit code.
#[must_use]
pub fn run() -> ExitCode {
    let cli = cli::Cli::parse();
    let json = cli.json;

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let failure = error::Failure::from_anyhow(&err);
            if json {
                eprintln!("{}", failure.to_json());
            } else {
                eprintln!("{}", failure.to_text());
            }
            ExitCode::from(failure.exit_code)
        }
    }
}
