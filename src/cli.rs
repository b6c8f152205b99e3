//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `extbundle`.
#[derive(Debug, Parser)]
#[command(
    name = "extbundle",
    version,
    about = "Bundle an application entry file and every class it depends on into one file"
)]
pub struct Cli {
    /// Display informational messages as well as warnings and errors.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Config and entry file options shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Base path to the web folder (absolute or relative).
    #[arg(short, long = "base-path", default_value = ".")]
    pub base_path: PathBuf,

    /// Config file, relative to the base path.
    #[arg(short, long, value_name = "FILE")]
    pub config: String,

    /// Entry source file, relative to the base path.
    #[arg(short, long, value_name = "FILE")]
    pub source: String,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve dependencies and write the bundle.
    Build {
        /// Config and entry file.
        #[command(flatten)]
        sources: SourceArgs,

        /// Output file, relative to the base path. Defaults to the source
        /// file, which is first backed up as `<name>.src.js`.
        #[arg(short, long, value_name = "FILE")]
        output: Option<String>,

        /// Write a delimiter comment before each bundled file.
        #[arg(short = 'l', long)]
        delimiter: bool,

        /// Strip comments and indentation from bundled files.
        #[arg(short, long)]
        minify: bool,
    },
    /// Resolve dependencies and print the bundle order without writing.
    List {
        /// Config and entry file.
        #[command(flatten)]
        sources: SourceArgs,

        /// Print the full report as JSON.
        #[arg(long)]
        json: bool,
    },
}
