use super::{load_plan, resolve_config};
use crate::cli::ConvertFormat;
use crate::io;
use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;

pub struct ConvertConfig {
    pub path: PathBuf,
    pub config: Option<PathBuf>,
    pub format: ConvertFormat,
    pub output: Option<PathBuf>,
}

/// Print the assembled record as JSON, or the canonical table as CSV.
///
/// Row-level problems found while assembling are logged, not fatal; run
/// `validate` for the full report.
pub fn convert_plan(config: ConvertConfig) -> Result<()> {
    let settings = resolve_config(config.config.as_deref())?;
    let table = load_plan(&config.path, &settings)?;

    let text = match config.format {
        ConvertFormat::Json => {
            let assembly = table.to_record()?;
            for issue in assembly.diagnostics.issues() {
                log::warn!("{}: {}", issue.from, issue.error);
            }
            let mut json = serde_json::to_string_pretty(&assembly.record)?;
            json.push('\n');
            json
        }
        ConvertFormat::Csv => table.get_table()?.to_delimited()?,
    };

    let mut out = io::open_output(config.output.as_deref())?;
    out.write_all(text.as_bytes())?;
    out.flush()?;
    Ok(())
}
