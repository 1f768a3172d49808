//! Shared error types for the application

use thiserror::Error;

/// Hard failures of outcomemap operations.
///
/// Row-level gaps and rule violations are never reported through this type;
/// they are accumulated as [`crate::validation::ValidationIssue`]s instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The raw table does not have the expected shape
    #[error("Format error: {message}")]
    Format { message: String },

    /// An operation needing a populated table ran before initialization
    #[error("This {table} is not initialized.")]
    Uninitialized { table: String },

    /// A replacement table does not match the header cardinality
    #[error("Number of columns does not match number of headers: expected {expected}, got {actual}")]
    ColumnMismatch { expected: usize, actual: usize },

    /// The table source could not produce rows
    #[error("Unable to read {source_name}: {message}")]
    SourceRead {
        source_name: String,
        message: String,
    },

    /// The upload server answered with a non-success status
    #[error("Upload rejected with status {status}: {body}")]
    Upload {
        status: u16,
        body: serde_json::Value,
    },

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Delimited-text errors
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Create a format error
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Create an uninitialized-table error
    pub fn uninitialized(table: impl Into<String>) -> Self {
        Self::Uninitialized {
            table: table.into(),
        }
    }

    /// Create a source read error
    pub fn source_read(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SourceRead {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Whether this error aborts parsing rather than describing transport or setup trouble
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
