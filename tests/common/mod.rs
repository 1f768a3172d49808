//! Shared fixtures for integration tests.

#![allow(dead_code)]

use indoc::indoc;
use outcomemap::{Coaep, RecordTable};
use std::path::PathBuf;

pub const HEADER: &str =
    "No.,Course Outcome Statement,Intended Learning Outcome,Assessment Tool,Performance Target";

/// A plan that passes every check.
pub const CLEAN_PLAN: &str = indoc! {"
    Name of Faculty:,Dela Cruz
    Course:,IT 101
    No.,Course Outcome Statement,Intended Learning Outcome,Assessment Tool,Performance Target
    1,(E) APPLYING: Students will build pages.,APPLYING: Write markup.,Lab,80% of students score 75%
    ,,APPLYING: Style pages.,,
    2,(D) ANALYZING: Students will examine pages.,APPLYING: Run audits.,Exam,70% of students score 60%
    ,,ANALYZING: Compare strategies.,,
"};

pub fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/coaep_sample.csv")
}

/// A plan built from outcome rows below the standard header.
pub fn plan(rows: &[&str]) -> String {
    let mut text = String::from(HEADER);
    text.push('\n');
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}

pub fn table_from(text: &str) -> RecordTable<Coaep> {
    let mut table = RecordTable::new(Coaep::new());
    table.initialize_from_csv(text).expect("plan should load");
    table
}
