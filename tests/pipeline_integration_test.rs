//! End-to-end tests of the validate pipeline over COAEP exports.

mod common;

use common::{plan, sample_path, table_from, CLEAN_PLAN};
use indoc::indoc;
use outcomemap::validation::coaep::{ILO_TAXO_ORDER, LAST_ILO_TAXO, MIN_CO_TAXO};
use outcomemap::{
    CellPosition, Coaep, CoaepValidator, CognitiveLevel, CsvFile, Error, RecordTable, TableSource,
};
use pretty_assertions::assert_eq;

#[test]
fn test_sample_export_validates_cleanly() {
    let mut table = RecordTable::new(Coaep::new());
    table.initialize_table(&CsvFile::new(sample_path())).unwrap();

    let report = table.validate();
    assert!(report.success, "unexpected issues: {:#?}", report.issues());
    assert_eq!(report.data.issues.len(), 0);

    let record = report.record().unwrap();
    assert_eq!(record.metadata.faculty.as_deref(), Some("Maria Dela Cruz"));
    assert_eq!(record.metadata.course.as_deref(), Some("IT 101 - Web Systems"));
    assert_eq!(record.metadata.school_year.as_deref(), Some("2024-2025"));
    assert_eq!(record.metadata.semester, Some(2));
    assert_eq!(record.course_outcomes.len(), 2);
    assert_eq!(record.ilo_count(), 4);

    let second = &record.course_outcomes[1];
    assert_eq!(second.grammar.cognitive_level, Some(CognitiveLevel::D));
    assert_eq!(second.intended_learning_outcomes[0].assessment_tool, "Practical exam");
    assert_eq!(second.intended_learning_outcomes[1].assessment_tool, "Written report");
    assert_eq!(second.intended_learning_outcomes[1].target.performance_target, Some(70));
}

#[test]
fn test_record_serializes_with_server_field_names() {
    let table = table_from(CLEAN_PLAN);
    let record = table.to_record().unwrap().record;
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["faculty"], "Dela Cruz");
    assert!(json["sy"].is_null());
    assert_eq!(json["co"][0]["taxonomy_level"], "applying");
    assert_eq!(json["co"][0]["ilo"][1]["assessment_tool"], "Lab");
    assert_eq!(json["co"][1]["ilo"][0]["passing_score"], 60);
}

#[test]
fn test_one_course_outcome_per_statement_and_ilos_per_block() {
    let table = table_from(CLEAN_PLAN);
    let record = table.to_record().unwrap().record;
    let counts: Vec<usize> = record
        .course_outcomes
        .iter()
        .map(|co| co.intended_learning_outcomes.len())
        .collect();
    assert_eq!(counts, vec![2, 2]);
    assert_eq!(record.ilo_count(), table.get_table().unwrap().len());
}

#[test]
fn test_missing_header_is_format_error() {
    let mut table = RecordTable::new(Coaep::new());
    let err = table
        .initialize_from_csv("Name,Email\nJuan,juan@example.com\n")
        .unwrap_err();
    assert!(matches!(err, Error::Format { .. }));
    assert!(!table.is_initialized());
}

#[test]
fn test_low_co_taxonomy_is_reported_at_statement() {
    let table = table_from(&plan(&[
        "1,(I) UNDERSTANDING: Students will explain markup.,UNDERSTANDING: Describe tags.,Quiz,80% 75%",
    ]));
    let report = table.validate();

    let low: Vec<_> = report.issues().iter().filter(|i| i.from == MIN_CO_TAXO).collect();
    assert_eq!(low.len(), 1);
    assert!(low[0].error.contains("UNDERSTANDING"));
    assert_eq!(low[0].position(), Some(CellPosition::new(0, 1)));
    assert!(!report.success);
}

#[test]
fn test_descending_ilo_taxonomy_is_reported_once() {
    let table = table_from(&plan(&[
        "1,EVALUATING: Students will judge designs.,ANALYZING: Compare layouts.,Rubric,80% 75%",
        ",,APPLYING: Use a grid.,,",
        ",,EVALUATING: Critique a page.,,",
    ]));
    let report = table.validate();

    let order: Vec<_> = report.issues().iter().filter(|i| i.from == ILO_TAXO_ORDER).collect();
    assert_eq!(order.len(), 1);
    assert_eq!(order[0].position(), Some(CellPosition::new(1, 2)));
    assert!(report
        .data
        .success_messages
        .contains(&format!("{LAST_ILO_TAXO} successfully validated.")));
}

#[test]
fn test_structural_gaps_do_not_stop_domain_validators() {
    let table = table_from(&plan(&[
        "1,APPLYING: Students will build.,APPLYING: Write.,,",
        ",,ANALYZING: Compare.,,",
    ]));
    let report = table.validate();
    let froms: Vec<&str> = report.issues().iter().map(|i| i.from.as_str()).collect();

    assert!(froms.contains(&"COAEP_FIELDS"));
    assert!(froms.contains(&"COAEP_TO_RECORD"));
    assert!(froms.contains(&LAST_ILO_TAXO));
    assert!(report.record().is_some());
}

#[test]
fn test_carry_forward_across_continuation_rows() {
    let table = table_from(indoc! {"
        Course Outcome,ILO,Assessment Tool,Performance Target
        APPLYING: Students will build.,APPLYING: Write.,Portfolio,90% of students score 85%
        ,APPLYING: Style.,,
        ,APPLYING: Deploy.,,
    "});
    let record = table.to_record().unwrap().record;
    for ilo in &record.course_outcomes[0].intended_learning_outcomes {
        assert_eq!(ilo.assessment_tool, "Portfolio");
        assert_eq!(ilo.target.passing_score, Some(85));
    }
}

#[test]
fn test_emission_stops_at_first_empty_ilo() {
    let table = table_from(&plan(&[
        "1,APPLYING: Students will build.,APPLYING: Write.,Quiz,80% 75%",
        ",,,,",
        "2,ANALYZING: Students will compare.,ANALYZING: Contrast.,Quiz,80% 75%",
    ]));
    assert_eq!(table.get_table().unwrap().len(), 1);
}

#[test]
fn test_validator_registration_is_configurable() {
    let mut table = RecordTable::with_validators(Coaep::new(), Vec::new());
    table.initialize_from_csv(CLEAN_PLAN).unwrap();
    table.use_validator(CoaepValidator::IloTaxonomyOrder);

    let report = table.validate();
    assert_eq!(
        report.data.success_messages.last().map(String::as_str),
        Some("ILO_TAXO_ORDER successfully validated.")
    );
    assert!(!report
        .data
        .success_messages
        .iter()
        .any(|m| m.starts_with(MIN_CO_TAXO)));
}

#[test]
fn test_spreadsheet_source_is_rejected() {
    let err = CsvFile::new("plan.xlsx").read_rows().unwrap_err();
    assert!(matches!(err, Error::SourceRead { .. }));
}
