//! End-to-end build steps shared by the commands.
//!
//! File names given on the command line are logical paths joined onto the
//! base path, so `-b www -s /portal/app.js` reads `www/portal/app.js` and
//! reports the entry as `/portal/app.js`.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::info;

use crate::config::BuildConfig;
use crate::context::ServiceContext;
use crate::engine::{disk_path, ResolutionEngine, ResolvedGraph};
use crate::error::BuildError;
use crate::output::{self, BuildReport, OutputOptions};

/// Inputs to a resolution run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRequest {
    /// Directory logical paths are resolved against.
    pub base_path: PathBuf,
    /// Config file, relative to the base path.
    pub config: String,
    /// Entry source file, relative to the base path.
    pub source: String,
}

/// Inputs to a full build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Config and entry file.
    pub sources: SourceRequest,
    /// Output file relative to the base path; the source file when absent.
    pub output: Option<String>,
    /// Rendering options.
    pub options: OutputOptions,
}

/// Backup name for a source about to be overwritten:
/// `/portal/app.js` becomes `/portal/app.src.js`.
#[must_use]
pub fn backup_name(source: &str) -> String {
    format!("{}.src.js", source.strip_suffix(".js").unwrap_or(source))
}

/// Loads the config and resolves the dependency graph of the entry file.
///
/// # Errors
///
/// Returns config loading errors and [`BuildError::EntryNotFound`].
pub fn resolve(
    ctx: &ServiceContext,
    request: &SourceRequest,
) -> Result<(ResolvedGraph, DateTime<Utc>), BuildError> {
    let started_at = ctx.clock.now();
    info!(base_path = %request.base_path.display(), "base path");

    let config_path = disk_path(&request.base_path, &request.config);
    let config = BuildConfig::load(ctx.fs.as_ref(), &config_path)?;
    info!(config = %config_path.display(), app = %config.name, "config loaded");
    let source_path = disk_path(&request.base_path, &request.source);
    info!(source = %source_path.display(), "processing source files");

    let graph =
        ResolutionEngine::new(ctx.fs.as_ref(), &config, &request.base_path)?.run(&request.source)?;
    Ok((graph, started_at))
}

/// Resolves without writing anything and reports the bundle order.
///
/// # Errors
///
/// See [`resolve`].
pub fn list(ctx: &ServiceContext, request: &SourceRequest) -> Result<BuildReport, BuildError> {
    let (graph, started_at) = resolve(ctx, request)?;
    let ordered = output::linearize(&graph.registry);
    Ok(BuildReport::new(&graph, &ordered, started_at, ctx.clock.now()))
}

/// Resolves, renders and writes the bundle.
///
/// Without an explicit output the source file itself is overwritten after
/// being copied to its [`backup_name`].
///
/// # Errors
///
/// Returns [`BuildError::BackupFailed`] or [`BuildError::OutputWrite`] on
/// I/O failure, plus the errors of [`resolve`].
pub fn build(ctx: &ServiceContext, request: &BuildRequest) -> Result<BuildReport, BuildError> {
    let sources = &request.sources;
    let (graph, started_at) = resolve(ctx, sources)?;

    let output_name = match &request.output {
        Some(output) => output.clone(),
        None => {
            info!("no output file specified, using the source file");
            backup_source(ctx, &sources.base_path, &sources.source)?;
            sources.source.clone()
        }
    };
    let output_path = disk_path(&sources.base_path, &output_name);
    info!(
        output = %output_path.display(),
        delimiter = request.options.delimiter,
        minify = request.options.minify,
        "output file"
    );

    let ordered = output::linearize(&graph.registry);
    let bundle = output::render(&ordered, request.options);
    output::write_bundle(ctx.fs.as_ref(), &output_path, &bundle)?;

    let report = BuildReport::new(&graph, &ordered, started_at, ctx.clock.now());
    info!("build complete");
    report.log();
    Ok(report)
}

fn backup_source(ctx: &ServiceContext, base_path: &Path, source: &str) -> Result<(), BuildError> {
    let source_path = disk_path(base_path, source);
    let backup = disk_path(base_path, &backup_name(source));
    let failed = |reason: String| BuildError::BackupFailed {
        source_path: source_path.clone(),
        backup: backup.clone(),
        reason,
    };

    let contents = ctx.fs.read_to_string(&source_path).map_err(|e| failed(e.to_string()))?;
    ctx.fs.write(&backup, &contents).map_err(|e| failed(e.to_string()))?;
    info!(backup = %backup.display(), "source backup written");
    Ok(())
}
