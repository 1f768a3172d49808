//! Validate-run reports.

use crate::validation::{Diagnostics, ValidationIssue};
use serde::Serialize;
use std::collections::BTreeMap;

/// Outcome of a validate run.
///
/// `success` is true only when no issue was recorded. The record is the
/// best-effort record even when `success` is false.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report<R> {
    pub success: bool,
    pub message: String,
    pub data: ReportData<R>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData<R> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<R>,
    #[serde(rename = "successMessages")]
    pub success_messages: Vec<String>,
    pub issues: Vec<ValidationIssue>,
}

impl<R> Report<R> {
    /// Summarize a completed run.
    pub fn from_diagnostics(table_name: &str, record: Option<R>, diagnostics: Diagnostics) -> Self {
        let (successes, issues) = diagnostics.into_parts();

        let mut message = format!("{table_name} ran its validations.");
        if !successes.is_empty() {
            message.push_str(&format!(" {} validations were successful.", successes.len()));
        }
        if !issues.is_empty() {
            message.push_str(&format!(" {} validations failed.", issues.len()));
        }

        Self {
            success: issues.is_empty(),
            message,
            data: ReportData {
                record,
                success_messages: successes,
                issues,
            },
        }
    }

    /// A run that could not complete.
    pub fn failed(message: impl Into<String>, record: Option<R>, diagnostics: Diagnostics) -> Self {
        let (success_messages, issues) = diagnostics.into_parts();
        Self {
            success: false,
            message: message.into(),
            data: ReportData {
                record,
                success_messages,
                issues,
            },
        }
    }

    pub fn record(&self) -> Option<&R> {
        self.data.record.as_ref()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.data.issues
    }

    pub fn summary(&self) -> IssueSummary {
        IssueSummary::from_issues(&self.data.issues)
    }
}

/// Issue counts grouped by the stage or validator that raised them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueSummary {
    pub total: usize,
    pub by_source: BTreeMap<String, usize>,
}

impl IssueSummary {
    pub fn from_issues(issues: &[ValidationIssue]) -> Self {
        let mut by_source = BTreeMap::new();
        for issue in issues {
            *by_source.entry(issue.from.clone()).or_insert(0) += 1;
        }
        Self {
            total: issues.len(),
            by_source,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn render(&self) -> String {
        let mut out = format!("Issue breakdown ({} total):\n", self.total);
        for (source, count) in &self.by_source {
            out.push_str(&format!("  {source}: {count} issue(s)\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnostics(issues: &[(&str, &str)], successes: usize) -> Diagnostics {
        let mut d = Diagnostics::new();
        for (from, error) in issues {
            d.issue(ValidationIssue::new(*from, *error));
        }
        for i in 0..successes {
            d.success(format!("check {i} passed"));
        }
        d
    }

    #[test]
    fn test_message_counts_both_lists() {
        let report: Report<()> =
            Report::from_diagnostics("COAEP table", None, diagnostics(&[("A", "bad")], 2));
        assert!(!report.success);
        assert_eq!(
            report.message,
            "COAEP table ran its validations. 2 validations were successful. 1 validations failed."
        );
    }

    #[test]
    fn test_message_omits_empty_counts() {
        let report: Report<()> = Report::from_diagnostics("T", None, diagnostics(&[], 0));
        assert!(report.success);
        assert_eq!(report.message, "T ran its validations.");
    }

    #[test]
    fn test_serialized_shape() {
        let report = Report::from_diagnostics("T", Some(42u32), diagnostics(&[("A", "bad")], 1));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["data"]["record"], 42);
        assert_eq!(json["data"]["successMessages"][0], "check 0 passed");
        assert_eq!(json["data"]["issues"][0]["from"], "A");
    }

    #[test]
    fn test_summary_groups_by_source() {
        let report: Report<()> = Report::from_diagnostics(
            "T",
            None,
            diagnostics(&[("B", "x"), ("A", "y"), ("B", "z")], 0),
        );
        let summary = report.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.by_source.get("B"), Some(&2));
        assert_eq!(
            summary.render(),
            "Issue breakdown (3 total):\n  A: 1 issue(s)\n  B: 2 issue(s)\n"
        );
    }
}
