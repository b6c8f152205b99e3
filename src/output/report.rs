//! Run report: ranked module listing, issues and summary figures.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::diagnostics::{Issue, Severity};
use crate::engine::ResolvedGraph;
use crate::module::{Module, ModuleSummary};

/// An issue with its severity and rendered message.
#[derive(Debug, Clone, Serialize)]
pub struct ReportedIssue {
    /// Severity tag.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Structured issue fields.
    #[serde(flatten)]
    pub issue: Issue,
}

/// Outcome of one resolution run.
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    /// Logical path of the entry file.
    pub entry: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Wall time from start to report.
    pub elapsed_seconds: f64,
    /// Emitted modules in bundle order.
    pub modules: Vec<ModuleSummary>,
    /// Logical paths that could not be read.
    pub missing: Vec<String>,
    /// Every recorded issue.
    pub issues: Vec<ReportedIssue>,
    /// Error count.
    pub errors: usize,
    /// Warning count.
    pub warnings: usize,
}

impl BuildReport {
    /// Summarizes a resolved graph whose emitted modules are `ordered`.
    #[must_use]
    pub fn new(
        graph: &ResolvedGraph,
        ordered: &[&Module],
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let elapsed_seconds = (finished_at - started_at).num_milliseconds() as f64 / 1000.0;

        Self {
            entry: graph.registry.get(graph.entry).logical_path().to_string(),
            started_at,
            elapsed_seconds,
            modules: ordered.iter().map(|m| ModuleSummary::from(*m)).collect(),
            missing: graph
                .registry
                .iter()
                .filter(|m| !m.exists())
                .map(|m| m.logical_path().to_string())
                .collect(),
            issues: graph
                .diagnostics
                .issues()
                .iter()
                .map(|issue| ReportedIssue {
                    severity: issue.severity(),
                    message: issue.to_string(),
                    issue: issue.clone(),
                })
                .collect(),
            errors: graph.diagnostics.errors(),
            warnings: graph.diagnostics.warnings(),
        }
    }

    /// Number of files in the bundle.
    #[must_use]
    pub fn files(&self) -> usize {
        self.modules.len()
    }

    /// One `rank : identifier : path` line per emitted module.
    #[must_use]
    pub fn listing(&self) -> String {
        let mut out = String::new();
        for module in &self.modules {
            let marker = if module.enabled { "" } else { " (disabled)" };
            let _ = writeln!(
                out,
                "{} : {} : {}{marker}",
                module.rank, module.identifier, module.path
            );
        }
        out
    }

    /// Summary block lines.
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.errors > 0 {
            lines.push(format!("-- errors : {}", self.errors));
        }
        if self.warnings > 0 {
            lines.push(format!("-- warnings : {}", self.warnings));
        }
        lines.push(format!("-- total : {} files", self.files()));
        lines.push(format!("-- time : {} seconds", self.elapsed_seconds));
        lines
    }

    /// Logs the ranked listing and the summary block.
    pub fn log(&self) {
        info!("-- rank : class --");
        for module in &self.modules {
            info!(
                rank = module.rank,
                path = %module.path,
                "{} : {}",
                module.rank,
                module.identifier
            );
        }
        for line in self.summary_lines() {
            info!("{line}");
        }
    }
}
