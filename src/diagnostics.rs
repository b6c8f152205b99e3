//! Per-module issues and the run-level counters they feed.

use serde::Serialize;
use tracing::{error, warn};

/// Severity tag attached to every diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Progress information.
    Info,
    /// Recoverable problem; the build output may be incomplete.
    Warning,
    /// A dependency could not be loaded.
    Error,
}

/// A non-fatal problem found while resolving one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// The resolved path could not be read.
    #[error("File not found : {path} (class '{identifier}')")]
    MissingModule {
        /// Identifier that first reached the file.
        identifier: String,
        /// Logical path that failed to load.
        path: String,
    },

    /// The same identifier was declared more than once by one module.
    #[error("Class '{identifier}' has {count} duplicate dependencies. File : {path}")]
    DuplicateDependency {
        /// Declaring module.
        identifier: String,
        /// Declaring module's logical path.
        path: String,
        /// Number of collapsed duplicates.
        count: usize,
    },

    /// Expansion stopped because the module sits at or beyond the rank ceiling.
    #[error(
        "Rank limit {limit} has been reached, possibly a dependency cycle. \
         Stopped processing class '{identifier}'. File : {path}"
    )]
    RankCeilingExceeded {
        /// Module that was disabled.
        identifier: String,
        /// Its logical path.
        path: String,
        /// Configured ceiling.
        limit: u32,
    },
}

impl Issue {
    /// Severity of this issue.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingModule { .. } => Severity::Error,
            Self::DuplicateDependency { .. } | Self::RankCeilingExceeded { .. } => {
                Severity::Warning
            }
        }
    }
}

/// Collects issues for one run and keeps the error/warning tallies.
#[derive(Debug, Default)]
pub struct Diagnostics {
    issues: Vec<Issue>,
    errors: usize,
    warnings: usize,
}

impl Diagnostics {
    /// Records an issue, logs it and bumps the matching counter.
    pub fn record(&mut self, issue: Issue) {
        match issue.severity() {
            Severity::Error => {
                error!(%issue, "dependency error");
                self.errors += 1;
            }
            Severity::Warning => {
                warn!(%issue, "dependency warning");
                self.warnings += 1;
            }
            Severity::Info => {}
        }
        self.issues.push(issue);
    }

    /// All recorded issues in the order they occurred.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Number of error-severity issues.
    #[must_use]
    pub fn errors(&self) -> usize {
        self.errors
    }

    /// Number of warning-severity issues.
    #[must_use]
    pub fn warnings(&self) -> usize {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_follow_severity() {
        let mut diagnostics = Diagnostics::default();
        diagnostics.record(Issue::MissingModule {
            identifier: "Demo.view.Missing".into(),
            path: "/portal/view/Missing.js".into(),
        });
        diagnostics.record(Issue::DuplicateDependency {
            identifier: "Demo".into(),
            path: "/portal/app.js".into(),
            count: 2,
        });

        assert_eq!(diagnostics.errors(), 1);
        assert_eq!(diagnostics.warnings(), 1);
        assert_eq!(diagnostics.issues().len(), 2);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let issue = Issue::RankCeilingExceeded {
            identifier: "Demo.Loop".into(),
            path: "/portal/Loop.js".into(),
            limit: 5,
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["kind"], "rank_ceiling_exceeded");
        assert_eq!(json["limit"], 5);
    }
}
