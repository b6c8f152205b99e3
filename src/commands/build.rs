//! `extbundle build` command.

use crate::cli::SourceArgs;
use crate::context::ServiceContext;
use crate::output::OutputOptions;
use crate::pipeline::{self, BuildRequest};

/// Execute the `build` command.
///
/// # Errors
///
/// Returns an error string if the config, entry file, backup or output
/// cannot be read or written.
pub fn run(
    ctx: &ServiceContext,
    sources: &SourceArgs,
    output: Option<&str>,
    delimiter: bool,
    minify: bool,
) -> Result<(), String> {
    let request = BuildRequest {
        sources: sources.into(),
        output: output.map(str::to_string),
        options: OutputOptions { delimiter, minify },
    };
    pipeline::build(ctx, &request).map(|_| ()).map_err(|e| e.to_string())
}
