//! # Error reporting
//!
//! Every failure of the load, partition, factor and solve steps is reported through the `Error`
//! type. Nothing is retried: input is static, so a failure means the input or the configuration
//! is wrong.
use std::error;
use std::fmt;
use std::fmt::Display;

use crate::io::error::LoadError;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Highest error in the hierarchy.
#[derive(Debug)]
pub enum Error {
    /// The data source could not be read or parsed.
    Load(LoadError),
    /// A reshape was requested that doesn't fit the number of elements.
    ShapeMismatch {
        /// Number of elements held by the buffer.
        elements: usize,
        /// Requested number of rows.
        rows: usize,
        /// Requested number of columns.
        columns: usize,
    },
    /// A flat sequence of values doesn't hold a matrix followed by its right-hand side.
    ValueCount {
        /// Number of values read.
        values: usize,
        /// Requested number of rows, also the length of the right-hand side.
        rows: usize,
        /// Requested number of matrix columns, not counting the right-hand side.
        columns: usize,
    },
    /// Blocks or factors that should be stacked have a different number of columns.
    ColumnMismatch {
        /// Index of the offending block, in partition order, if known.
        partition: Option<usize>,
        /// Number of columns of the first block.
        expected: usize,
        /// Number of columns of the offending block.
        found: usize,
    },
    /// A block has fewer rows than columns, so its factorization has no square triangular factor.
    UnderdeterminedBlock {
        /// Index of the offending block, in partition order, if the matrix was partitioned.
        partition: Option<usize>,
        /// Number of rows in the block.
        rows: usize,
        /// Number of columns in the block.
        columns: usize,
    },
    /// The right-hand side doesn't have a value for each row of the matrix.
    RightHandSide {
        /// Number of rows of the matrix.
        rows: usize,
        /// Number of right-hand side values.
        values: usize,
    },
    /// A diagonal entry of the final triangular factor is (relatively) too small.
    ///
    /// The design matrix is (numerically) rank deficient.
    SingularFactor {
        /// Row and column of the offending diagonal entry.
        index: usize,
        /// Absolute value of the offending diagonal entry.
        magnitude: f64,
        /// Values with a magnitude below this threshold are considered zero.
        threshold: f64,
    },
    /// The dense QR primitive could not factor a block.
    FactorizationFailure {
        /// What went wrong, for the end user.
        reason: String,
    },
    /// The solver configuration is not usable.
    InvalidConfig(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Load(error) => error.fmt(f),
            Error::ShapeMismatch { elements, rows, columns } => match rows.checked_mul(*columns) {
                Some(expected) => write!(
                    f,
                    "Can't view {} elements as a {} x {} matrix ({} elements)",
                    elements, rows, columns, expected,
                ),
                None => write!(
                    f,
                    "Can't view {} elements as a {} x {} matrix (too many elements)",
                    elements, rows, columns,
                ),
            },
            Error::ValueCount { values, rows, columns } => write!(
                f,
                "Expected the values of a {} x {} matrix followed by {} right-hand side values, found {} values",
                rows, columns, rows, values,
            ),
            Error::ColumnMismatch { partition: Some(index), expected, found } => write!(
                f,
                "Partition {} has {} columns, expected {} like the partitions before it",
                index, found, expected,
            ),
            Error::ColumnMismatch { partition: None, expected, found } => write!(
                f,
                "Can't stack factors of size {} and {}",
                expected, found,
            ),
            Error::UnderdeterminedBlock { partition: Some(index), rows, columns } => write!(
                f,
                "Partition {} has {} rows but {} columns, it should have at least as many rows as columns",
                index, rows, columns,
            ),
            Error::UnderdeterminedBlock { partition: None, rows, columns } => write!(
                f,
                "Matrix has {} rows but {} columns, it should have at least as many rows as columns",
                rows, columns,
            ),
            Error::RightHandSide { rows, values } => write!(
                f,
                "Right-hand side has {} values, expected one for each of the {} rows",
                values, rows,
            ),
            Error::SingularFactor { index, magnitude, threshold } => write!(
                f,
                "Triangular factor is singular: diagonal entry {} has magnitude {:e}, below threshold {:e}",
                index, magnitude, threshold,
            ),
            Error::FactorizationFailure { reason } => write!(f, "Factorization failed: {}", reason),
            Error::InvalidConfig(description) => write!(f, "Invalid configuration: {}", description),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Load(error) => Some(error),
            _ => None,
        }
    }
}

impl From<LoadError> for Error {
    fn from(error: LoadError) -> Self {
        Error::Load(error)
    }
}
