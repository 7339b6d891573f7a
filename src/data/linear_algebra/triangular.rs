//! # Upper triangular matrix
use std::fmt;
use std::fmt::Display;

use num_traits::Zero;

use crate::data::linear_algebra::dense::Dense;

/// A square matrix `R` with only zeros below the diagonal.
///
/// The values below the diagonal are stored, as zeros, so that the matrix can be stacked on top of
/// another one without copying it into a new layout. They are never read for their value.
#[derive(Debug, Clone, PartialEq)]
pub struct UpperTriangular<F> {
    inner: Dense<F>,
}

impl<F: Zero + Clone> UpperTriangular<F> {
    /// Build the factor by computing each value on or above the diagonal.
    ///
    /// # Arguments
    ///
    /// * `size`: Number of rows and columns.
    /// * `f`: Called with `(i, j)` where `i <= j` only.
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> F) -> Self {
        let inner = Dense::from_fn(size, size, |i, j| if i <= j { f(i, j) } else { F::zero() });

        Self { inner }
    }

    /// Take the upper triangle of a square matrix.
    ///
    /// Whatever is stored below the diagonal is replaced by zeros.
    pub fn from_dense(mut inner: Dense<F>) -> Self {
        debug_assert_eq!(inner.nr_rows(), inner.nr_columns());

        for i in 1..inner.nr_rows() {
            for value in &mut inner.row_mut(i)[..i] {
                *value = F::zero();
            }
        }

        Self { inner }
    }
}

impl<F> UpperTriangular<F> {
    /// Number of rows, which is equal to the number of columns.
    pub fn size(&self) -> usize {
        self.inner.nr_rows()
    }

    /// Value at row `i` and column `j`, with `i <= j`.
    pub fn get(&self, i: usize, j: usize) -> &F {
        debug_assert!(i <= j);

        &self.inner[(i, j)]
    }

    /// Diagonal values, top left to bottom right.
    pub fn diagonal(&self) -> impl Iterator<Item = &F> {
        (0..self.size()).map(move |i| &self.inner[(i, i)])
    }

    /// Values of row `i` to the right of the diagonal.
    pub fn right_of_diagonal(&self, i: usize) -> &[F] {
        &self.inner.row(i)[i + 1..]
    }

    /// The factor as a square dense matrix, including the zeros.
    pub fn as_dense(&self) -> &Dense<F> {
        &self.inner
    }

    /// Take the square dense matrix, including the zeros.
    pub fn into_dense(self) -> Dense<F> {
        self.inner
    }
}

impl<F: Display> Display for UpperTriangular<F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.inner.fmt(f)
    }
}
