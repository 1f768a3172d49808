//! CLI command implementations.
//!
//! - **validate**: run the full pipeline and print the report
//! - **convert**: print the assembled record or the canonical table
//! - **upload**: validate, then send the plan to the outcomes server
//! - **init**: write a default `.outcomemap.toml`

pub mod convert;
pub mod init;
pub mod upload;
pub mod validate;

pub use convert::{convert_plan, ConvertConfig};
pub use init::init_config;
pub use upload::{upload_plan, UploadPlanConfig};
pub use validate::{validate_plan, ValidateConfig};

use crate::config::{self, OutcomemapConfig};
use crate::formats::Coaep;
use crate::table::{CsvFile, RecordTable};
use anyhow::{Context, Result};
use std::path::Path;

/// The explicit config file when given, otherwise the discovered one.
pub fn resolve_config(path: Option<&Path>) -> Result<OutcomemapConfig> {
    match path {
        Some(p) => config::load_config_file(p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => Ok(config::load_config()),
    }
}

/// Read and canonicalize a plan export.
pub fn load_plan(path: &Path, config: &OutcomemapConfig) -> Result<RecordTable<Coaep>> {
    let mut table = RecordTable::new(config.coaep_format());
    table
        .initialize_table(&CsvFile::new(path))
        .with_context(|| format!("Failed to load plan from {}", path.display()))?;
    Ok(table)
}
