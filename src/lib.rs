//! Core library entry for the `extbundle` CLI.
//!
//! `extbundle` follows the class declarations of an application entry file
//! (`requires`, `controllers`, `views` and the other configured keywords),
//! maps every referenced class to its source file and concatenates the
//! whole dependency graph into one file, deepest dependencies first.

pub mod adapters;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod filter;
pub mod logging;
pub mod module;
pub mod output;
pub mod pipeline;
pub mod ports;
pub mod resolve;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    logging::init(cli.verbose);
    commands::dispatch(&cli.command)
}
