//! # Dense matrix
//!
//! Wrapping a `Vec` such that it has a fixed, row-major shape.
use std::fmt;
use std::fmt::Display;
use std::mem;
use std::ops::{Index, IndexMut};

use itertools::Itertools;
use num_traits::Zero;

use crate::error::{Error, Result};

/// Row-major storage of `nr_rows * nr_columns` values.
///
/// The length of the data is equal to `nr_rows * nr_columns` at all times. Shape changes either
/// keep the data as is (`reshape`) or replace it entirely (`resize`).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Dense<F> {
    data: Vec<F>,
    nr_rows: usize,
    nr_columns: usize,
}

impl<F> Dense<F> {
    /// Create a matrix from row-major data.
    ///
    /// # Arguments
    ///
    /// * `data`: Values, row after row.
    /// * `nr_rows`: Number of rows.
    /// * `nr_columns`: Number of columns, the length of each row.
    ///
    /// # Errors
    ///
    /// When the length of `data` doesn't match the shape.
    pub fn new(data: Vec<F>, nr_rows: usize, nr_columns: usize) -> Result<Self> {
        if fits(data.len(), nr_rows, nr_columns) {
            Ok(Self { data, nr_rows, nr_columns, })
        } else {
            Err(Error::ShapeMismatch { elements: data.len(), rows: nr_rows, columns: nr_columns })
        }
    }

    /// A matrix without values, with zero rows and zero columns.
    pub fn empty() -> Self {
        Self { data: Vec::new(), nr_rows: 0, nr_columns: 0, }
    }

    /// Take ownership of a flat sequence of values, as a single column.
    pub fn from_values(data: Vec<F>) -> Self {
        let nr_rows = data.len();
        Self { data, nr_rows, nr_columns: 1, }
    }

    /// Build a matrix by computing each value from its row and column index.
    pub fn from_fn(nr_rows: usize, nr_columns: usize, mut f: impl FnMut(usize, usize) -> F) -> Self {
        let data = (0..nr_rows)
            .cartesian_product(0..nr_columns)
            .map(|(i, j)| f(i, j))
            .collect();

        Self { data, nr_rows, nr_columns, }
    }

    /// Number of rows.
    pub fn nr_rows(&self) -> usize {
        self.nr_rows
    }

    /// Number of columns.
    pub fn nr_columns(&self) -> usize {
        self.nr_columns
    }

    /// Number of values, `nr_rows * nr_columns`.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether there are no values.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All values, row after row.
    pub fn data(&self) -> &[F] {
        &self.data
    }

    /// Give up the shape and take the values, row after row.
    pub fn into_data(self) -> Vec<F> {
        self.data
    }

    /// Values in row `i`.
    pub fn row(&self, i: usize) -> &[F] {
        debug_assert!(i < self.nr_rows);

        &self.data[i * self.nr_columns..(i + 1) * self.nr_columns]
    }

    /// Mutable values in row `i`.
    pub fn row_mut(&mut self, i: usize) -> &mut [F] {
        debug_assert!(i < self.nr_rows);

        &mut self.data[i * self.nr_columns..(i + 1) * self.nr_columns]
    }

    /// Iterate over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[F]> {
        // The data is empty when there are no columns, the chunk size just has to be valid.
        self.data.chunks_exact(self.nr_columns.max(1))
    }

    /// Values in column `j`, top to bottom.
    pub fn column(&self, j: usize) -> impl Iterator<Item = &F> {
        debug_assert!(j < self.nr_columns);

        self.data.iter().skip(j).step_by(self.nr_columns.max(1))
    }

    /// View the same values with a different shape.
    ///
    /// The values are not touched, only the logical shape changes.
    ///
    /// # Errors
    ///
    /// When `nr_rows * nr_columns` is not equal to the number of values.
    pub fn reshape(&mut self, nr_rows: usize, nr_columns: usize) -> Result<()> {
        if fits(self.data.len(), nr_rows, nr_columns) {
            self.nr_rows = nr_rows;
            self.nr_columns = nr_columns;
            Ok(())
        } else {
            Err(Error::ShapeMismatch { elements: self.data.len(), rows: nr_rows, columns: nr_columns })
        }
    }

    /// Remove the first `n` rows and return them.
    ///
    /// If there are fewer than `n` rows, all rows are moved.
    ///
    /// # Return value
    ///
    /// A matrix with the removed rows, in order, and the same number of columns.
    pub fn split_head(&mut self, n: usize) -> Self {
        let n = n.min(self.nr_rows);

        let tail = self.data.split_off(n * self.nr_columns);
        let head = mem::replace(&mut self.data, tail);
        self.nr_rows -= n;

        Self { data: head, nr_rows: n, nr_columns: self.nr_columns, }
    }

    /// Remove the last `n` rows and return them.
    ///
    /// If there are fewer than `n` rows, all rows are moved.
    ///
    /// # Return value
    ///
    /// A matrix with the removed rows, in order, and the same number of columns.
    pub fn split_tail(&mut self, n: usize) -> Self {
        let n = n.min(self.nr_rows);

        let remaining = self.nr_rows - n;
        let tail = self.data.split_off(remaining * self.nr_columns);
        self.nr_rows = remaining;

        Self { data: tail, nr_rows: n, nr_columns: self.nr_columns, }
    }

    /// Append the rows of another matrix below the rows of this one.
    ///
    /// # Arguments
    ///
    /// * `other`: Matrix with the same number of columns.
    pub fn append_rows(&mut self, other: Self) {
        debug_assert_eq!(self.nr_columns, other.nr_columns);

        self.data.extend(other.data);
        self.nr_rows += other.nr_rows;
    }
}

/// Whether `nr_elements` values form an `nr_rows x nr_columns` matrix, without overflowing.
fn fits(nr_elements: usize, nr_rows: usize, nr_columns: usize) -> bool {
    nr_rows.checked_mul(nr_columns) == Some(nr_elements)
}

impl<F: Clone> Dense<F> {
    /// Create a matrix with all values being equal to a given value.
    pub fn filled(value: F, nr_rows: usize, nr_columns: usize) -> Self {
        Self { data: vec![value; nr_rows * nr_columns], nr_rows, nr_columns, }
    }
}

impl<F: Zero + Clone> Dense<F> {
    /// Create a matrix of zeros.
    pub fn zeros(nr_rows: usize, nr_columns: usize) -> Self {
        Self::filled(F::zero(), nr_rows, nr_columns)
    }

    /// Change the shape, dropping all values.
    ///
    /// All values are zero afterwards, whether the shape changed or not.
    pub fn resize(&mut self, nr_rows: usize, nr_columns: usize) {
        *self = Self::zeros(nr_rows, nr_columns);
    }
}

impl<F> Default for Dense<F> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<F> Index<(usize, usize)> for Dense<F> {
    type Output = F;

    fn index(&self, (i, j): (usize, usize)) -> &Self::Output {
        debug_assert!(i < self.nr_rows);
        debug_assert!(j < self.nr_columns);

        &self.data[i * self.nr_columns + j]
    }
}

impl<F> IndexMut<(usize, usize)> for Dense<F> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Self::Output {
        debug_assert!(i < self.nr_rows);
        debug_assert!(j < self.nr_columns);

        &mut self.data[i * self.nr_columns + j]
    }
}

impl<F: Display> Display for Dense<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} x {}", self.nr_rows, self.nr_columns)?;
        for row in self.rows() {
            writeln!(f, "{}", row.iter().join(" "))?;
        }
        Ok(())
    }
}
