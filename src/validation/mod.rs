//! Validation diagnostics and the record validator seam.
//!
//! Every stage of a validate run (initialization check, field checks, record
//! assembly, domain validators) appends to one [`Diagnostics`] value that is
//! threaded through the run and returned at the end. Nothing in here fails
//! hard: rule violations are data.

pub mod coaep;

pub use coaep::CoaepValidator;

use crate::table::{CanonicalTable, CellPosition};
use serde::{Deserialize, Serialize};

/// Message recorded by a validator that is handed no record.
pub const UNABLE_TO_ACCESS_RECORD: &str = "Unable to access record.";

/// A reported invariant violation, attributed to the stage that raised it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    pub from: String,
}

impl ValidationIssue {
    pub fn new(from: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            row: None,
            column: None,
            from: from.into(),
        }
    }

    pub fn at_cell(mut self, row: usize, column: usize) -> Self {
        self.row = Some(row);
        self.column = Some(column);
        self
    }

    /// Attach coordinates when a lookup found them.
    pub fn at(self, position: Option<CellPosition>) -> Self {
        match position {
            Some(p) => self.at_cell(p.row, p.column),
            None => self,
        }
    }

    pub fn position(&self) -> Option<CellPosition> {
        Some(CellPosition::new(self.row?, self.column?))
    }
}

/// Success messages and issues accumulated over one validate run.
///
/// Both lists are append-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    successes: Vec<String>,
    issues: Vec<ValidationIssue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.successes.push(message.into());
    }

    pub fn issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn extend_issues(&mut self, issues: impl IntoIterator<Item = ValidationIssue>) {
        self.issues.extend(issues);
    }

    /// Append everything from another run stage, preserving order.
    pub fn merge(&mut self, other: Diagnostics) {
        self.successes.extend(other.successes);
        self.issues.extend(other.issues);
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<ValidationIssue>) {
        (self.successes, self.issues)
    }
}

/// A domain rule checked against an assembled record.
///
/// Implementors only decide which issues a record has; [`validate`] turns
/// that into the shared reporting convention: the issues if there are any,
/// otherwise one success message naming the validator.
///
/// [`validate`]: RecordValidator::validate
pub trait RecordValidator<R> {
    /// Attribution written into every issue this validator raises
    fn name(&self) -> &str;

    fn check(&self, record: &R, table: &CanonicalTable) -> Vec<ValidationIssue>;

    fn validate(&self, record: Option<&R>, table: &CanonicalTable, diagnostics: &mut Diagnostics) {
        let Some(record) = record else {
            diagnostics.issue(ValidationIssue::new(self.name(), UNABLE_TO_ACCESS_RECORD));
            return;
        };

        let issues = self.check(record, table);
        log::debug!("{} raised {} issue(s)", self.name(), issues.len());
        if issues.is_empty() {
            diagnostics.success(format!("{} successfully validated.", self.name()));
        } else {
            diagnostics.extend_issues(issues);
        }
    }
}
