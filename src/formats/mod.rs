//! Plan formats.
//!
//! A format knows how to turn raw rows into its canonical table, which
//! row-level checks apply to that table, and how to rebuild the hierarchical
//! record from it. [`crate::table::RecordTable`] drives a format through the
//! validate pipeline without knowing anything format-specific.

pub mod coaep;

pub use coaep::Coaep;

use crate::core::Result;
use crate::table::{CanonicalTable, Cell, RawTable};
use crate::validation::{Diagnostics, RecordValidator};
use serde::Serialize;
use std::fmt::Debug;

/// Canonical rows plus the metadata scraped alongside them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Built<M> {
    pub rows: Vec<Vec<Cell>>,
    pub metadata: M,
}

/// An assembled record and the diagnostics raised while assembling it.
///
/// The record is always the best effort: row-level problems are reported in
/// `diagnostics`, never by dropping the record.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly<R> {
    pub record: R,
    pub diagnostics: Diagnostics,
}

pub trait TableFormat {
    type Metadata: Debug + Clone + Default;
    type Record: Debug + Clone + Serialize;
    type Validator: RecordValidator<Self::Record> + Debug + Clone;

    /// Short upper-case key used to attribute pipeline-level issues
    const KEY: &'static str;

    /// Display name of the table, e.g. `"COAEP table"`
    fn name(&self) -> &str;

    fn headers(&self) -> Vec<String>;

    /// Canonicalize raw rows. Fails hard when the raw table is not in this
    /// format at all; never returns a partial table on failure.
    fn build(&self, raw: &RawTable) -> Result<Built<Self::Metadata>>;

    /// Row-level completeness checks over the canonical table.
    fn validate_fields(&self, table: &CanonicalTable, diagnostics: &mut Diagnostics);

    fn assemble(&self, table: &CanonicalTable, metadata: &Self::Metadata) -> Assembly<Self::Record>;

    /// Whether domain validators have anything to inspect.
    fn is_usable(record: &Self::Record) -> bool;

    fn default_validators(&self) -> Vec<Self::Validator>;
}
