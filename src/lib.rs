// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod common;
pub mod config;
pub mod core;
pub mod extraction;
pub mod formats;
pub mod io;
pub mod report;
pub mod table;
pub mod validation;

// Re-export commonly used types
pub use crate::core::{
    CoaepMetadata, CoaepRecord, CognitiveLevel, CourseOutcome, Error, IntendedLearningOutcome,
    ObjectiveGrammar, PerformanceTarget, Result, TaxonomyLevel,
};

pub use crate::extraction::{extract_objective, parse_performance_target};
pub use crate::formats::{Assembly, Coaep, TableFormat};
pub use crate::report::{IssueSummary, Report};
pub use crate::table::{
    locate_header, CanonicalTable, CellPosition, CsvFile, CsvText, HeaderLayout, HeaderScan,
    RawTable, RecordTable, TableSource,
};
pub use crate::validation::{
    CoaepValidator, Diagnostics, RecordValidator, ValidationIssue, UNABLE_TO_ACCESS_RECORD,
};
