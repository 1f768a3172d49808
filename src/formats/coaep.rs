//! Course Outcomes Assessment Plan (COAEP) format.
//!
//! Canonical columns: `No.`, `Course Outcome Statement`,
//! `Intended Learning Outcome`, `Assessment Tool`, `Performance Target`.
//! One canonical row per ILO; a row with a CO statement starts a new course
//! outcome and rows below it with a blank CO cell continue it.

use super::{Assembly, Built, TableFormat};
use crate::common::{collapse_whitespace, first_integer, is_integer, non_blank, strip_ilo_prefix};
use crate::core::{
    CoaepMetadata, CoaepRecord, CourseOutcome, Error, IntendedLearningOutcome, Result,
    TaxonomyLevel,
};
use crate::extraction::{extract_objective, parse_performance_target};
use crate::table::{locate_header, CanonicalTable, Cell, HeaderLayout, HeaderScan, RawTable};
use crate::validation::{CoaepValidator, Diagnostics, ValidationIssue};
use std::collections::HashSet;

pub const NUMBER: usize = 0;
pub const CO_STATEMENT: usize = 1;
pub const ILO_STATEMENT: usize = 2;
pub const ASSESSMENT_TOOL: usize = 3;
pub const PERFORMANCE_TARGET: usize = 4;

pub const HEADERS: [&str; 5] = [
    "No.",
    "Course Outcome Statement",
    "Intended Learning Outcome",
    "Assessment Tool",
    "Performance Target",
];

pub const FIELDS_FROM: &str = "COAEP_FIELDS";
pub const TO_RECORD_FROM: &str = "COAEP_TO_RECORD";

const HEADER_NOT_FOUND: &str =
    "Could not auto-detect header row. Please ensure the CSV file is in the correct COAEP format.";

const FACULTY_LABEL: &str = "Name of Faculty:";
const SCHOOL_YEAR_LABEL: &str = "School Year";
const COURSE_LABEL: &str = "Course:";
const SEMESTER_LABEL: &str = "Semester";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coaep {
    scan: HeaderScan,
    validators: Vec<CoaepValidator>,
}

impl Default for Coaep {
    fn default() -> Self {
        Self {
            scan: HeaderScan::default(),
            validators: CoaepValidator::defaults(),
        }
    }
}

impl Coaep {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scan(mut self, scan: HeaderScan) -> Self {
        self.scan = scan;
        self
    }

    /// Replace the validators registered by default.
    pub fn with_validators(mut self, validators: Vec<CoaepValidator>) -> Self {
        self.validators = validators;
        self
    }

    pub fn scan(&self) -> HeaderScan {
        self.scan
    }
}

impl TableFormat for Coaep {
    type Metadata = CoaepMetadata;
    type Record = CoaepRecord;
    type Validator = CoaepValidator;

    const KEY: &'static str = "COAEP";

    fn name(&self) -> &str {
        "COAEP table"
    }

    fn headers(&self) -> Vec<String> {
        HEADERS.iter().map(|h| h.to_string()).collect()
    }

    fn build(&self, raw: &RawTable) -> Result<Built<CoaepMetadata>> {
        let layout = locate_header(raw, self.scan).ok_or_else(|| Error::format(HEADER_NOT_FOUND))?;
        let metadata = scrape_metadata(raw);

        // The first row with an empty ILO cell ends the plan.
        let rows: Vec<Vec<Cell>> = raw
            .rows()
            .iter()
            .skip(layout.header_row + 1)
            .map_while(|row| canonical_row(row, &layout))
            .collect();

        log::debug!(
            "built {} canonical COAEP rows below header row {}",
            rows.len(),
            layout.header_row
        );
        Ok(Built { rows, metadata })
    }

    fn validate_fields(&self, table: &CanonicalTable, diagnostics: &mut Diagnostics) {
        let issues = field_issues(table);
        if issues.is_empty() {
            diagnostics.success(format!("{FIELDS_FROM} successfully validated."));
        } else {
            diagnostics.extend_issues(issues);
        }
    }

    fn assemble(&self, table: &CanonicalTable, metadata: &CoaepMetadata) -> Assembly<CoaepRecord> {
        assemble_record(table, metadata)
    }

    fn is_usable(record: &CoaepRecord) -> bool {
        !record.course_outcomes.is_empty()
    }

    fn default_validators(&self) -> Vec<CoaepValidator> {
        self.validators.clone()
    }
}

fn canonical_row(row: &[String], layout: &HeaderLayout) -> Option<Vec<Cell>> {
    let at = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(String::as_str);

    let ilo = at(layout.ilo).and_then(non_blank)?;

    // A pure number in the CO column means the statement sits one to the right.
    let (number, statement) = match layout.course_outcome {
        Some(co) if at(Some(co)).is_some_and(is_integer) => (at(Some(co)), at(Some(co + 1))),
        Some(co) => (at(co.checked_sub(1)), at(Some(co))),
        None => (None, None),
    };

    Some(vec![
        owned(number.and_then(non_blank)),
        owned(statement.and_then(non_blank)),
        Some(ilo.to_string()),
        at(layout.assessment_tool)
            .map(strip_ilo_prefix)
            .filter(|s| !s.is_empty()),
        at(layout.performance_target)
            .map(collapse_whitespace)
            .filter(|s| !s.is_empty()),
    ])
}

fn owned(text: Option<&str>) -> Cell {
    text.map(str::to_string)
}

/// Scan every raw row for label cells. Later non-empty values replace
/// earlier ones.
fn scrape_metadata(raw: &RawTable) -> CoaepMetadata {
    let mut metadata = CoaepMetadata::default();
    for row in raw.rows() {
        if let Some(v) = labelled_value(row, FACULTY_LABEL) {
            metadata.faculty = Some(v.to_string());
        }
        if let Some(v) = labelled_value(row, SCHOOL_YEAR_LABEL) {
            metadata.school_year = Some(v.to_string());
        }
        if let Some(v) = labelled_value(row, COURSE_LABEL) {
            metadata.course = Some(v.to_string());
        }
        if let Some(n) = labelled_value(row, SEMESTER_LABEL).and_then(first_integer) {
            metadata.semester = Some(n);
        }
    }
    metadata
}

fn labelled_value<'a>(row: &'a [String], label: &str) -> Option<&'a str> {
    let idx = row.iter().position(|cell| cell.trim() == label)?;
    row.get(idx + 1).and_then(|v| non_blank(v))
}

fn field_issues(table: &CanonicalTable) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut current_co: Option<&str> = None;
    let mut seen_ilos: HashSet<&str> = HashSet::new();

    for row in 0..table.len() {
        let co = table.cell(row, CO_STATEMENT);
        let starts_block = co.is_some() || row == 0;
        let issue = |message: String, column: usize| {
            ValidationIssue::new(FIELDS_FROM, message).at_cell(row, column)
        };

        match table.cell(row, NUMBER) {
            None if starts_block => issues.push(issue("Missing CO number.".into(), NUMBER)),
            Some(n) if !is_integer(n) => {
                issues.push(issue(format!("CO number '{n}' is not an integer."), NUMBER))
            }
            _ => {}
        }

        match co {
            Some(statement) => {
                current_co = Some(statement);
                issues.extend(grammar_issues("CO statement", statement, row, CO_STATEMENT));
            }
            None if current_co.is_none() => {
                issues.push(issue("Missing CO statement.".into(), CO_STATEMENT))
            }
            None => {}
        }

        match table.cell(row, ILO_STATEMENT) {
            Some(statement) => {
                if seen_ilos.insert(statement) {
                    issues.extend(grammar_issues("ILO statement", statement, row, ILO_STATEMENT));
                }
            }
            None => issues.push(issue("Missing ILO statement.".into(), ILO_STATEMENT)),
        }

        // Continuation rows inherit tool and target from the block's first row.
        if starts_block {
            if table.cell(row, ASSESSMENT_TOOL).is_none() {
                issues.push(issue("Missing assessment tool.".into(), ASSESSMENT_TOOL));
            }
            if table.cell(row, PERFORMANCE_TARGET).is_none() {
                issues.push(issue("Missing performance target.".into(), PERFORMANCE_TARGET));
            }
        }
    }

    issues
}

fn grammar_issues(kind: &str, statement: &str, row: usize, column: usize) -> Vec<ValidationIssue> {
    let grammar = extract_objective(statement);
    let issue = |message: String| ValidationIssue::new(FIELDS_FROM, message).at_cell(row, column);

    let Some(level) = grammar.taxonomy_level.as_deref() else {
        return vec![issue(format!("{kind} has no taxonomy level: {statement}"))];
    };

    let mut issues = Vec::new();
    if TaxonomyLevel::parse(level).is_none() {
        issues.push(issue(format!("{kind} has an unknown taxonomy level '{level}'.")));
    }
    if grammar.verb.is_none() {
        issues.push(issue(format!("{kind} has no verb: {statement}")));
    }
    issues
}

fn assemble_record(table: &CanonicalTable, metadata: &CoaepMetadata) -> Assembly<CoaepRecord> {
    let mut record = CoaepRecord::new(metadata.clone());
    let mut diagnostics = Diagnostics::new();
    let mut last_tool: Option<&str> = None;
    let mut last_target: Option<&str> = None;

    for row in 0..table.len() {
        let issue = |message: &str, column: usize| {
            ValidationIssue::new(TO_RECORD_FROM, message).at_cell(row, column)
        };
        let co = table.cell(row, CO_STATEMENT);

        if row == 0 && co.is_none() {
            diagnostics.issue(issue("Cannot have empty CO Statement in first row.", CO_STATEMENT));
        }

        if let Some(statement) = co {
            last_tool = None;
            last_target = None;
            record
                .course_outcomes
                .push(CourseOutcome::new(statement, extract_objective(statement)));
        }

        if let Some(tool) = table.cell(row, ASSESSMENT_TOOL) {
            last_tool = Some(tool);
        }
        if let Some(target) = table.cell(row, PERFORMANCE_TARGET) {
            last_target = Some(target);
        }

        let ilo = table.cell(row, ILO_STATEMENT);
        if ilo.is_none() {
            diagnostics.issue(issue("Cannot have empty ILO.", ILO_STATEMENT));
        }
        if last_tool.is_none() {
            diagnostics.issue(issue("Cannot have empty Assessment Tool.", ASSESSMENT_TOOL));
        }
        if last_target.is_none() {
            diagnostics.issue(issue("Cannot have empty Performance Target.", PERFORMANCE_TARGET));
        }

        let Some(statement) = ilo else {
            continue;
        };
        let Some(current) = record.course_outcomes.last_mut() else {
            if row > 0 {
                diagnostics.issue(issue("ILO has no CO Statement above it.", CO_STATEMENT));
            }
            log::debug!("row {row}: ILO before any CO, not attached");
            continue;
        };

        current.intended_learning_outcomes.push(IntendedLearningOutcome {
            statement: statement.to_string(),
            assessment_tool: last_tool.unwrap_or_default().to_string(),
            target: parse_performance_target(last_target.unwrap_or_default()),
            grammar: extract_objective(statement),
        });
    }

    if diagnostics.has_issues() {
        diagnostics.issue(ValidationIssue::new(
            TO_RECORD_FROM,
            "Converted COAEP table to a record, but with errors.",
        ));
    } else {
        diagnostics.success("Successfully converted COAEP table to a record.");
    }

    log::debug!(
        "assembled {} course outcomes with {} ILOs",
        record.course_outcomes.len(),
        record.ilo_count()
    );
    Assembly {
        record,
        diagnostics,
    }
}
