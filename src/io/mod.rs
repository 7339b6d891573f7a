//! # Reading of numeric data
//!
//! Data files are plain text: floating point values separated by whitespace. Line breaks carry no
//! meaning, the values are read as one flat sequence. Giving that sequence its shape is up to the
//! caller, see `Dense::reshape`.
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use log::debug;

use crate::data::linear_algebra::dense::Dense;
use crate::io::error::{LoadError, ParseError};

pub mod error;

/// Load all values from a file.
///
/// # Arguments
///
/// * `file_path`: Path of a text file with whitespace-separated numbers.
///
/// # Return value
///
/// A single-column buffer with one row per value, in file order.
///
/// # Errors
///
/// When the file cannot be opened or read, or when a token is not a number.
pub fn load<F: FromStr>(file_path: &Path) -> Result<Dense<F>, LoadError> {
    debug!("Reading values from \"{}\"", file_path.to_string_lossy());

    let file = File::open(file_path)?;
    read(file)
}

/// Read all values from a reader.
///
/// # Errors
///
/// When reading fails, or when a token is not a number.
pub fn read<F: FromStr, R: Read>(mut reader: R) -> Result<Dense<F>, LoadError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    parse(&text).map_err(LoadError::from)
}

/// Parse whitespace-separated values.
///
/// Parsing stops at the first token that isn't a number.
///
/// # Return value
///
/// A single-column buffer with one row per value.
pub fn parse<F: FromStr>(text: &str) -> Result<Dense<F>, ParseError> {
    let mut values = Vec::new();

    for (line_index, line) in text.lines().enumerate() {
        for token in line.split_whitespace() {
            match token.parse() {
                Ok(value) => values.push(value),
                Err(_) => return Err(ParseError::new(
                    "Failed to parse value",
                    (line_index as u64 + 1, token.to_string()),
                    values.len(),
                )),
            }
        }
    }

    debug!("Parsed {} values", values.len());
    Ok(Dense::from_values(values))
}
