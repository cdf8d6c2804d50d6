//! CSV bulk import parsing.
//!
//! Parsing is all-or-nothing: every row is checked and, if any row fails,
//! the whole file is rejected with the list of row errors. Writing the parsed
//! rows is the database layer's job.

pub mod account;
pub mod date_dimension;
pub mod error;
pub mod gl;
pub mod template;

pub use account::{AccountRecord, AccountType, parse_accounts};
pub use date_dimension::{DateDimensionRecord, parse_date_dimensions};
pub use error::{ImportError, RowError};
pub use gl::{DimensionIndex, NewGlTransaction, parse_gl_transactions};
pub use template::ImportKind;

use std::io::Read;

use serde::de::DeserializeOwned;

/// Reads all rows of a CSV file after checking its header.
///
/// Rows are numbered from 1 (first data row).
fn read_rows<R, T>(reader: R, required: &[&str]) -> Result<Vec<(usize, csv::Result<T>)>, ImportError>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let missing: Vec<String> = required
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| (*column).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::MissingColumns(missing));
    }

    Ok(csv_reader
        .deserialize::<T>()
        .enumerate()
        .map(|(index, row)| (index + 1, row))
        .collect())
}

/// Treats empty strings as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
