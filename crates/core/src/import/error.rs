//! Import error types.

use std::fmt;

use thiserror::Error;

/// Maximum number of row errors rendered in an error message.
pub const MAX_REPORTED_ROWS: usize = 10;

/// A single rejected row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// Data row number, starting at 1.
    pub row: usize,
    /// What went wrong.
    pub message: String,
}

impl RowError {
    /// Creates a row error.
    pub fn new(row: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            message: message.into(),
        }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

/// Errors that reject an import file.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file is not readable CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The header lacks required columns.
    #[error("Missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// One or more rows failed validation; nothing is imported.
    #[error("Import rejected, {} row error(s): {}", .0.len(), summarize(.0))]
    InvalidRows(Vec<RowError>),
}

fn summarize(errors: &[RowError]) -> String {
    errors
        .iter()
        .take(MAX_REPORTED_ROWS)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
