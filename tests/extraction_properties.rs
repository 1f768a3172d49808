//! Property-based tests for the extractors, the header locator and record assembly
//!
//! These tests verify invariants that should hold for all inputs:
//! - Extraction never panics and is deterministic
//! - Well-formed statements always yield their tag, level and verb
//! - Performance targets pick the first two integers in order
//! - Headers outside the scan window are never found
//! - Assembly yields one ILO per canonical row and is idempotent

mod common;

use common::{plan, table_from};
use outcomemap::{
    extract_objective, locate_header, parse_performance_target, HeaderScan, RawTable,
    TaxonomyLevel,
};
use proptest::prelude::*;

fn taxonomy_level() -> impl Strategy<Value = TaxonomyLevel> {
    prop::sample::select(TaxonomyLevel::ALL.to_vec())
}

fn word() -> impl Strategy<Value = String> {
    "[a-z]{2,10}".prop_filter("not a modal", |w| w != "will" && w != "shall")
}

proptest! {
    #[test]
    fn prop_extraction_is_total_and_deterministic(statement in ".{0,120}") {
        let first = extract_objective(&statement);
        let second = extract_objective(&statement);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_well_formed_statement_round_trips(
        tag in prop::sample::select(vec!["I", "E", "D"]),
        level in taxonomy_level(),
        verb in word(),
        rest in "[a-z ]{0,30}",
    ) {
        let statement = format!(
            "({}) {}: Students will {} {}",
            tag,
            level.as_str().to_uppercase(),
            verb.to_uppercase(),
            rest
        );
        let grammar = extract_objective(&statement);

        prop_assert_eq!(grammar.cognitive_level.map(|c| c.as_str()), Some(tag));
        prop_assert_eq!(grammar.taxonomy(), Some(level));
        prop_assert_eq!(grammar.verb, Some(verb));
    }

    #[test]
    fn prop_statement_without_colon_is_empty(statement in "[^:]{0,80}") {
        prop_assert!(extract_objective(&statement).is_empty());
    }

    #[test]
    fn prop_performance_target_takes_first_two_integers(
        a in 0u32..=100,
        b in 0u32..=100,
        c in 0u32..=100,
    ) {
        let text = format!("{a}% of students will score {b}% in {c} tries");
        let target = parse_performance_target(&text);
        prop_assert_eq!(target.performance_target, Some(a));
        prop_assert_eq!(target.passing_score, Some(b));
    }

    #[test]
    fn prop_header_found_only_inside_window(filler in 0usize..30) {
        let mut rows: Vec<Vec<String>> = (0..filler).map(|i| vec![format!("row {i}")]).collect();
        rows.push(
            ["No.", "Course Outcome", "ILO", "Assessment Tool", "Performance Target"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        let layout = locate_header(&RawTable::new(rows), HeaderScan::default());

        if filler < 20 {
            let layout = layout.expect("header inside the window");
            prop_assert_eq!(layout.header_row, filler);
            prop_assert!(layout.course_outcome.unwrap() < 5);
            prop_assert!(layout.performance_target.unwrap() < 5);
        } else {
            prop_assert!(layout.is_none());
        }
    }

    #[test]
    fn prop_assembly_counts_and_idempotence(block_sizes in prop::collection::vec(1usize..5, 1..5)) {
        let mut rows = Vec::new();
        for (co, size) in block_sizes.iter().enumerate() {
            for ilo in 0..*size {
                if ilo == 0 {
                    rows.push(format!(
                        "{},APPLYING: Students will build thing {co}.,APPLYING: Step {co}-{ilo}.,Quiz,80% 75%",
                        co + 1
                    ));
                } else {
                    rows.push(format!(",,APPLYING: Step {co}-{ilo}.,,"));
                }
            }
        }
        let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
        let table = table_from(&plan(&refs));

        let first = table.to_record().unwrap();
        let second = table.to_record().unwrap();
        prop_assert_eq!(&first, &second);

        let counts: Vec<usize> = first
            .record
            .course_outcomes
            .iter()
            .map(|co| co.intended_learning_outcomes.len())
            .collect();
        prop_assert_eq!(counts, block_sizes);
        prop_assert!(!first.diagnostics.has_issues());
    }
}
