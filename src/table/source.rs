//! Table sources: where raw rows come from.
//!
//! Binary spreadsheet decoding is not done here. Workbooks are expected to be
//! exported to delimited text first; handing one to [`CsvFile`] is a
//! [`Error::SourceRead`], kept apart from format and validation problems.

use crate::core::{Error, Result};
use csv::ReaderBuilder;
use std::path::{Path, PathBuf};

const SPREADSHEET_EXTENSIONS: &[&str] = &["xls", "xlsx", "xlsm", "ods"];

/// Rows of text cells exactly as the source produced them.
///
/// Rows may have different widths; a cell beyond the end of a row is absent,
/// not empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell text at `(row, column)`, if that cell exists.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<Vec<S>> for RawTable {
    fn from_iter<I: IntoIterator<Item = Vec<S>>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}

/// Anything that can produce a [`RawTable`].
pub trait TableSource {
    /// Human-readable name used in errors and logs
    fn name(&self) -> String;

    fn read_rows(&self) -> Result<RawTable>;
}

/// Delimited text already in memory.
#[derive(Debug, Clone)]
pub struct CsvText {
    name: String,
    text: String,
}

impl CsvText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            name: "CSV string".to_string(),
            text: text.into(),
        }
    }

    pub fn named(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl TableSource for CsvText {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn read_rows(&self) -> Result<RawTable> {
        parse_delimited(&self.name, &self.text)
    }
}

/// A delimited-text file on disk.
#[derive(Debug, Clone)]
pub struct CsvFile {
    path: PathBuf,
}

impl CsvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TableSource for CsvFile {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn read_rows(&self) -> Result<RawTable> {
        if is_spreadsheet(&self.path) {
            return Err(Error::source_read(
                self.name(),
                "binary spreadsheets must be exported to CSV first",
            ));
        }

        let bytes = std::fs::read(&self.path)
            .map_err(|e| Error::source_read(self.name(), e.to_string()))?;
        let text = String::from_utf8_lossy(&bytes);
        parse_delimited(&self.name(), &text)
    }
}

fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

fn parse_delimited(source_name: &str, text: &str) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            Error::source_read(source_name, format!("record {idx}: {e}"))
        })?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    if rows.is_empty() {
        return Err(Error::source_read(source_name, "no rows found"));
    }

    log::debug!("read {} raw rows from {}", rows.len(), source_name);
    Ok(RawTable::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_text_keeps_ragged_rows() {
        let table = CsvText::new("a,b,c\nd\n\"e, f\",g\n").read_rows().unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.cell(0, 2), Some("c"));
        assert_eq!(table.cell(1, 1), None);
        assert_eq!(table.cell(2, 0), Some("e, f"));
    }

    #[test]
    fn test_empty_text_is_source_error() {
        let err = CsvText::new("").read_rows().unwrap_err();
        assert!(matches!(err, Error::SourceRead { .. }));
    }

    #[test]
    fn test_csv_file_reads_rows() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "No.,CO Statement").unwrap();
        writeln!(file, "1,APPLYING: Build things").unwrap();
        let table = CsvFile::new(file.path()).read_rows().unwrap();
        assert_eq!(table.cell(1, 1), Some("APPLYING: Build things"));
    }

    #[test]
    fn test_missing_file_is_source_error() {
        let err = CsvFile::new("/definitely/not/here.csv")
            .read_rows()
            .unwrap_err();
        assert!(matches!(err, Error::SourceRead { .. }));
    }

    #[test]
    fn test_spreadsheet_extension_rejected() {
        let err = CsvFile::new("plan.XLSX").read_rows().unwrap_err();
        match err {
            Error::SourceRead { message, .. } => assert!(message.contains("exported to CSV")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
