use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error type shared by ingestion, cleaning, conversion and extraction
// ---------------------------------------------------------------------------

/// Every failure is local to the file or action that produced it.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Unsupported file format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Failed to parse {file}: {reason}")]
    Parse { file: String, reason: String },

    #[error("{file} is not valid UTF-8 text: {source}")]
    Decode {
        file: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("Failed to write {format} output: {reason}")]
    Write { format: &'static str, reason: String },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Column '{column}' has {actual} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Row {row} has {actual} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("No uploaded file at position {0}")]
    NoSuchFile(usize),
}

impl SweepError {
    pub(crate) fn parse(file: &str, reason: impl ToString) -> Self {
        SweepError::Parse {
            file: file.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SweepError>;
