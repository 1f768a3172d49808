pub mod output;
pub mod upload;

pub use output::{create_writer, OutputFormat, OutputWriter};
pub use upload::{interpret_response, Payload, UploadTarget, Uploader};

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}

/// Stdout, or a file when a path is given.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) => {
            let file = fs::File::create(p)
                .with_context(|| format!("Failed to create {}", p.display()))?;
            Ok(Box::new(std::io::BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}
