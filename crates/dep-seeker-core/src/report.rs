//! Aggregate report over every module of a run.

use crate::types::LintResult;
use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Violations found while `fail_on_violations` is set.
///
/// Carries the full report text so the build log shows every finding.
#[derive(Debug, Error, Diagnostic)]
#[error("{report}")]
#[diagnostic(
    code(dep_seeker::lint_failure),
    help("remove the reported dependencies, add them to `ignored_dependencies`, or set `fail_on_violations = false`")
)]
pub struct LintFailure {
    /// The report text.
    pub report: String,
}

/// Errors raised while publishing a report.
#[derive(Debug, Error, Diagnostic)]
pub enum ReportError {
    /// The report file could not be written.
    #[error("Failed to write report {path}: {source}")]
    Io {
        /// Report path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The report contains violations and the run must fail.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Failed(#[from] LintFailure),
}

/// Combined findings of every analyzed module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateReport {
    lines: Vec<String>,
    modules_checked: usize,
    path: PathBuf,
}

impl AggregateReport {
    /// Builds a report for `result`, to be written at `path`.
    #[must_use]
    pub fn new(result: &LintResult, path: impl Into<PathBuf>) -> Self {
        Self::from_lines(result.lines(), result.modules_checked, path)
    }

    /// Builds a report from raw violation lines. Blank lines are dropped.
    #[must_use]
    pub fn from_lines(
        lines: impl IntoIterator<Item = String>,
        modules_checked: usize,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            lines: lines
                .into_iter()
                .filter(|line| !line.trim().is_empty())
                .collect(),
            modules_checked,
            path: path.into(),
        }
    }

    /// Whether no violations were found.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of violation lines.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.lines.len()
    }

    /// Where the report is written.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The report text.
    #[must_use]
    pub fn text(&self) -> String {
        if self.is_success() {
            format!("Analyzed {} modules. Issues not found", self.modules_checked)
        } else {
            format!(
                "Found {} lint issues({}):\n{}",
                self.lines.len(),
                self.path.display(),
                self.lines.join("\n")
            )
        }
    }

    /// Writes the report and applies the severity policy.
    ///
    /// With violations present, returns [`ReportError::Failed`] when
    /// `fail_on_violations` is set and only logs a warning otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written, or if violations
    /// were found and `fail_on_violations` is set.
    pub fn publish(&self, fail_on_violations: bool) -> Result<(), ReportError> {
        let text = self.text();
        self.write(&text)?;
        if self.is_success() {
            info!("{text}");
            return Ok(());
        }
        if fail_on_violations {
            return Err(LintFailure { report: text }.into());
        }
        warn!("{text}");
        Ok(())
    }

    fn write(&self, text: &str) -> Result<(), ReportError> {
        let io_error = |source| ReportError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }
        std::fs::write(&self.path, text).map_err(io_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn success_text() {
        let report = AggregateReport::from_lines(Vec::new(), 3, "report.txt");
        insta::assert_snapshot!(report.text(), @"Analyzed 3 modules. Issues not found");
    }

    #[test]
    fn failure_text_lists_every_line() {
        let report = AggregateReport::from_lines(
            lines(&[
                "Module :app declares unused dependency :core",
                "",
                "Module :app declared unused dependency g:a:1",
            ]),
            2,
            "build/report.txt",
        );
        assert_eq!(report.issue_count(), 2);
        assert_eq!(
            report.text(),
            "Found 2 lint issues(build/report.txt):\nModule :app declares unused dependency :core\nModule :app declared unused dependency g:a:1"
        );
    }

    #[test]
    fn empty_report_never_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build/report.txt");
        let report = AggregateReport::from_lines(Vec::new(), 0, &path);

        report.publish(true).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Analyzed 0 modules. Issues not found"
        );
    }

    #[test]
    fn violations_fail_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let report = AggregateReport::from_lines(lines(&["boom"]), 1, &path);

        match report.publish(true) {
            Err(ReportError::Failed(failure)) => assert_eq!(failure.report, report.text()),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), report.text());
    }

    #[test]
    fn violations_only_warn_when_soft() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        let report = AggregateReport::from_lines(lines(&["boom"]), 1, &path);

        report.publish(false).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("boom"));
    }
}
