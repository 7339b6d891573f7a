//! # Small regression problems read from disk
//!
//! `line.txt` holds four points to fit a line through: a matrix with a column of ones and a column
//! of x-coordinates, followed by the y-coordinates.
use std::path::{Path, PathBuf};

/// # Loading and solving
mod test;

/// Folder where the data files are stored.
fn data_file_directory() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("regression")
}

/// Compute the path of a data file, based on its name.
///
/// # Arguments
///
/// * `name`: File name without extension.
fn get_test_file_path(name: &str) -> PathBuf {
    data_file_directory().join(name).with_extension("txt")
}
