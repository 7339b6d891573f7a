//! # Least-squares problems
//!
//! The design matrix `A` together with the right-hand side `b`, before it is partitioned.
use crate::data::linear_algebra::dense::Dense;
use crate::data::partition::Partition;
use crate::error::{Error, Result};

/// Find `x` that minimizes `||Ax - b||`, with `A` having at least as many rows as columns.
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquares<F> {
    matrix: Dense<F>,
    rhs: Vec<F>,
}

impl<F> LeastSquares<F> {
    /// Create a new problem.
    ///
    /// # Errors
    ///
    /// When the matrix has no columns, has fewer rows than columns, or when the right-hand side
    /// doesn't have one value for each row.
    pub fn new(matrix: Dense<F>, rhs: Vec<F>) -> Result<Self> {
        if matrix.nr_columns() == 0 {
            return Err(Error::InvalidConfig("the matrix should have at least one column".to_string()));
        }
        if matrix.nr_rows() < matrix.nr_columns() {
            return Err(Error::UnderdeterminedBlock {
                partition: None,
                rows: matrix.nr_rows(),
                columns: matrix.nr_columns(),
            });
        }
        if matrix.nr_rows() != rhs.len() {
            return Err(Error::RightHandSide { rows: matrix.nr_rows(), values: rhs.len() });
        }

        Ok(Self { matrix, rhs, })
    }

    /// Read a problem from a flat sequence of values.
    ///
    /// # Arguments
    ///
    /// * `values`: The matrix in row-major order, followed by the right-hand side. The shape of
    /// the buffer is ignored.
    /// * `nr_rows`: Number of rows of the matrix, and length of the right-hand side.
    /// * `nr_columns`: Number of columns of the matrix.
    ///
    /// # Errors
    ///
    /// `ValueCount` when the number of values is not `nr_rows * (nr_columns + 1)`, or when the
    /// problem is not valid, see `new`.
    pub fn from_flat(mut values: Dense<F>, nr_rows: usize, nr_columns: usize) -> Result<Self> {
        let nr_values = values.len();
        let expected = nr_columns.checked_add(1).and_then(|width| nr_rows.checked_mul(width));
        if expected != Some(nr_values) {
            return Err(Error::ValueCount { values: nr_values, rows: nr_rows, columns: nr_columns });
        }

        values.reshape(nr_values, 1)?;
        let rhs = values.split_tail(nr_rows).into_data();
        values.reshape(nr_rows, nr_columns)?;

        Self::new(values, rhs)
    }

    /// Number of rows of the matrix.
    pub fn nr_rows(&self) -> usize {
        self.matrix.nr_rows()
    }

    /// Number of columns of the matrix, the number of unknowns.
    pub fn nr_columns(&self) -> usize {
        self.matrix.nr_columns()
    }

    /// The design matrix `A`.
    pub fn matrix(&self) -> &Dense<F> {
        &self.matrix
    }

    /// The right-hand side `b`.
    pub fn rhs(&self) -> &[F] {
        &self.rhs
    }

    /// All rows as a single partition.
    pub fn into_partition(self) -> Partition<F> {
        let Self { matrix, rhs } = self;
        Partition::at_offset(matrix, rhs, 0)
    }
}
