//! `extbundle list` command.

use crate::cli::SourceArgs;
use crate::context::ServiceContext;
use crate::output::BuildReport;
use crate::pipeline;

/// Execute the `list` command.
///
/// Prints one `rank : class : path` line per bundled file, or the whole
/// report as JSON.
///
/// # Errors
///
/// Returns an error string if resolution fails or the report cannot be
/// serialized.
pub fn run(ctx: &ServiceContext, sources: &SourceArgs, json: bool) -> Result<(), String> {
    let report = pipeline::list(ctx, &sources.into()).map_err(|e| e.to_string())?;
    print!("{}", render(&report, json)?);
    Ok(())
}

fn render(report: &BuildReport, json: bool) -> Result<String, String> {
    if json {
        let mut text = serde_json::to_string_pretty(report)
            .map_err(|e| format!("Failed to serialize report: {e}"))?;
        text.push('\n');
        return Ok(text);
    }

    let mut text = report.listing();
    for line in report.summary_lines() {
        text.push_str(&line);
        text.push('\n');
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryFileSystem;
    use crate::pipeline::SourceRequest;
    use std::path::PathBuf;

    fn report() -> BuildReport {
        let fs = MemoryFileSystem::new()
            .with_file("/www/build.yaml", "name: Demo\nappFolder: /app\n")
            .with_file("/www/app.js", "Ext.application({ requires: ['Demo.A'] });")
            .with_file("/www/app/A.js", "");
        let ctx = ServiceContext::in_memory(fs);
        let request = SourceRequest {
            base_path: PathBuf::from("/www"),
            config: "build.yaml".into(),
            source: "app.js".into(),
        };
        pipeline::list(&ctx, &request).unwrap()
    }

    #[test]
    fn text_listing_ends_with_summary() {
        let text = render(&report(), false).unwrap();
        assert!(text.starts_with("1 : Demo.A : /app/A.js\n0 : Demo : /app.js\n"));
        assert!(text.contains("-- total : 2 files\n"));
    }

    #[test]
    fn json_listing_parses_back() {
        let text = render(&report(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["modules"].as_array().map(Vec::len), Some(2));
    }
}
