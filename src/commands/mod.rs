//! Command dispatch and handlers.

pub mod build;
pub mod list;

use crate::cli::{Command, SourceArgs};
use crate::context::ServiceContext;
use crate::pipeline::SourceRequest;

/// Dispatch a parsed command to its handler against the real filesystem.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    dispatch_with_context(command, &ServiceContext::live())
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Build {
            sources,
            output,
            delimiter,
            minify,
        } => {
            build::run(ctx, sources, output.as_deref(), *delimiter, *minify)
        }
        Command::List { sources, json } => list::run(ctx, sources, *json),
    }
}

impl From<&SourceArgs> for SourceRequest {
    fn from(args: &SourceArgs) -> Self {
        Self {
            base_path: args.base_path.clone(),
            config: args.config.clone(),
            source: args.source.clone(),
        }
    }
}
