//! Tabular model shared by every plan format.
//!
//! - [`source`]: raw rows from delimited text
//! - [`header`]: heuristic header-row location
//! - [`CanonicalTable`]: the fixed-width table a format builder produces
//! - [`record_table`]: the table owner that ties a format, its validators and
//!   the report together

pub mod header;
pub mod record_table;
pub mod source;

pub use header::{locate_header, HeaderLayout, HeaderScan};
pub use record_table::RecordTable;
pub use source::{CsvFile, CsvText, RawTable, TableSource};

use crate::core::{Error, Result};
use serde::Serialize;

/// A canonical cell: `None` when blank.
pub type Cell = Option<String>;

/// Zero-based coordinates of a cell in a [`CanonicalTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellPosition {
    pub row: usize,
    pub column: usize,
}

impl CellPosition {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// A named table whose rows all have exactly `headers.len()` cells.
///
/// A table with no rows is uninitialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CanonicalTable {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl CanonicalTable {
    /// An empty, uninitialized table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Build a populated table, checking every row against the header count.
    pub fn with_rows(
        name: impl Into<String>,
        headers: Vec<String>,
        rows: Vec<Vec<Cell>>,
    ) -> Result<Self> {
        check_widths(headers.len(), &rows)?;
        Ok(Self {
            name: name.into(),
            headers,
            rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_initialized(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Non-blank text at `(row, column)`.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|c| c.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    /// Replace every row at once. The table must already be initialized and
    /// the new rows must be non-empty and match the header count.
    pub fn replace_rows(&mut self, rows: Vec<Vec<Cell>>) -> Result<()> {
        if !self.is_initialized() {
            return Err(Error::uninitialized(&self.name));
        }
        if rows.is_empty() {
            return Err(Error::format("Cannot set an empty table."));
        }
        check_widths(self.headers.len(), &rows)?;
        self.rows = rows;
        Ok(())
    }

    /// Position of the first cell (row-major) whose text equals `text` exactly.
    pub fn find_value(&self, text: &str) -> Option<CellPosition> {
        self.rows.iter().enumerate().find_map(|(r, row)| {
            row.iter()
                .position(|cell| cell.as_deref() == Some(text))
                .map(|c| CellPosition::new(r, c))
        })
    }

    /// Re-serialize the table (headers first) as comma-delimited text.
    pub fn to_delimited(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn check_widths(expected: usize, rows: &[Vec<Cell>]) -> Result<()> {
    match rows.iter().find(|row| row.len() != expected) {
        Some(row) => Err(Error::ColumnMismatch {
            expected,
            actual: row.len(),
        }),
        None => Ok(()),
    }
}
