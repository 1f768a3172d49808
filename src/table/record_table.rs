//! The table owner driving a format through the validate pipeline.

use super::{CanonicalTable, Cell, CellPosition, CsvText, TableSource};
use crate::core::{Error, Result};
use crate::formats::{Assembly, TableFormat};
use crate::report::Report;
use crate::validation::{Diagnostics, RecordValidator, ValidationIssue};

pub const ASSERT_INIT_FROM: &str = "ASSERT_INIT";
const INITIALIZED_MESSAGE: &str = "The table is initialized.";

/// Owns one canonical table of format `F`, the metadata scraped with it and
/// the validators registered against its records.
///
/// The table starts uninitialized. [`initialize_table`] populates it once
/// from a source; [`set_table`] may later replace every row at once.
///
/// [`initialize_table`]: RecordTable::initialize_table
/// [`set_table`]: RecordTable::set_table
#[derive(Debug, Clone)]
pub struct RecordTable<F: TableFormat> {
    format: F,
    table: CanonicalTable,
    metadata: F::Metadata,
    validators: Vec<F::Validator>,
}

impl<F: TableFormat> RecordTable<F> {
    /// An uninitialized table with the format's default validators registered.
    pub fn new(format: F) -> Self {
        let validators = format.default_validators();
        Self::with_validators(format, validators)
    }

    pub fn with_validators(format: F, validators: Vec<F::Validator>) -> Self {
        Self {
            table: CanonicalTable::new(format.name()),
            metadata: F::Metadata::default(),
            format,
            validators,
        }
    }

    pub fn name(&self) -> &str {
        self.table.name()
    }

    /// Column labels; empty until the table is initialized.
    pub fn headers(&self) -> &[String] {
        self.table.headers()
    }

    pub fn format(&self) -> &F {
        &self.format
    }

    pub fn metadata(&self) -> &F::Metadata {
        &self.metadata
    }

    pub fn validators(&self) -> &[F::Validator] {
        &self.validators
    }

    pub fn is_initialized(&self) -> bool {
        self.table.is_initialized()
    }

    pub fn get_table(&self) -> Result<&CanonicalTable> {
        self.assert_initialized()?;
        Ok(&self.table)
    }

    /// Replace every row. Fails if the table was never initialized or if a
    /// row's width differs from the header count.
    pub fn set_table(&mut self, rows: Vec<Vec<Cell>>) -> Result<()> {
        self.table.replace_rows(rows)
    }

    /// Read, canonicalize and store rows from `source`.
    ///
    /// On failure the table keeps whatever state it had before.
    pub fn initialize_table(&mut self, source: &dyn TableSource) -> Result<()> {
        let raw = source.read_rows()?;
        let built = self.format.build(&raw)?;
        if built.rows.is_empty() {
            return Err(Error::format("no outcome rows below header row"));
        }

        self.table = CanonicalTable::with_rows(self.format.name(), self.format.headers(), built.rows)?;
        self.metadata = built.metadata;
        log::info!(
            "initialized {} from {} ({} rows)",
            self.name(),
            source.name(),
            self.table.len()
        );
        Ok(())
    }

    pub fn initialize_from_csv(&mut self, text: &str) -> Result<()> {
        self.initialize_table(&CsvText::new(text))
    }

    /// Exact-text lookup over the canonical table.
    pub fn find_value(&self, text: &str) -> Result<Option<CellPosition>> {
        Ok(self.get_table()?.find_value(text))
    }

    /// Register another validator, run after those already registered.
    pub fn use_validator(&mut self, validator: F::Validator) {
        self.validators.push(validator);
    }

    /// Rebuild the record from the canonical table.
    pub fn to_record(&self) -> Result<Assembly<F::Record>> {
        let table = self.get_table()?;
        Ok(self.format.assemble(table, &self.metadata))
    }

    /// Run the whole pipeline: initialization check, field checks, record
    /// assembly, then every registered validator in registration order.
    pub fn validate(&self) -> Report<F::Record> {
        let mut diagnostics = Diagnostics::new();

        if let Err(err) = self.assert_initialized() {
            diagnostics.issue(ValidationIssue::new(ASSERT_INIT_FROM, err.to_string()));
            let message = format!("{} failed to run all its validations.", self.name());
            diagnostics.issue(ValidationIssue::new(
                format!("{}_VALIDATE", F::KEY),
                message.clone(),
            ));
            return Report::failed(message, None, diagnostics);
        }
        diagnostics.success(INITIALIZED_MESSAGE);

        self.format.validate_fields(&self.table, &mut diagnostics);

        let assembly = self.format.assemble(&self.table, &self.metadata);
        diagnostics.merge(assembly.diagnostics);
        let record = assembly.record;

        if F::is_usable(&record) {
            for validator in &self.validators {
                log::debug!("running validator {}", validator.name());
                validator.validate(Some(&record), &self.table, &mut diagnostics);
            }
        } else {
            log::warn!("{}: no usable record, skipping domain validators", self.name());
            diagnostics.issue(ValidationIssue::new(
                format!("{}_VALIDATE", F::KEY),
                "No usable record was assembled; domain validators were skipped.",
            ));
        }

        Report::from_diagnostics(self.name(), Some(record), diagnostics)
    }

    fn assert_initialized(&self) -> Result<()> {
        if self.table.is_initialized() {
            Ok(())
        } else {
            Err(Error::uninitialized(self.name()))
        }
    }
}
