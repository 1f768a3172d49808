//! Core domain types and errors.
//!
//! The record types mirror the payload accepted by the outcomes server, so
//! their serde names (`sy`, `co`, `ilo`) are part of the wire format.

pub mod errors;
pub mod types;

pub use errors::{Error, Result};
pub use types::{
    CoaepMetadata, CoaepRecord, CognitiveLevel, CourseOutcome, IntendedLearningOutcome,
    ObjectiveGrammar, PerformanceTarget, TaxonomyLevel,
};
