//! # Row blocks
//!
//! A tall matrix is cut into contiguous blocks of rows. Each block keeps the right-hand side values
//! of its rows, so that blocks can be factored independently of each other.
use std::mem;

use log::trace;

use crate::data::linear_algebra::dense::Dense;
use crate::error::{Error, Result};

/// Contiguous rows of a tall matrix together with the matching right-hand side values.
///
/// Concatenating all partitions split from one matrix, in order, gives back that matrix.
#[derive(Debug, Clone)]
pub struct Partition<F> {
    block: Dense<F>,
    rhs: Vec<F>,
    /// Index of the first row of this block in the matrix it was split from.
    first_row: usize,
}

impl<F> Partition<F> {
    /// Pair a block of rows with its right-hand side.
    ///
    /// # Errors
    ///
    /// When there isn't exactly one right-hand side value for each row.
    pub fn new(block: Dense<F>, rhs: Vec<F>) -> Result<Self> {
        if block.nr_rows() != rhs.len() {
            return Err(Error::RightHandSide { rows: block.nr_rows(), values: rhs.len() });
        }

        Ok(Self::at_offset(block, rhs, 0))
    }

    /// Pair rows that start at `first_row` in the original matrix with their right-hand side.
    ///
    /// The caller guarantees that there is one right-hand side value for each row.
    pub(crate) fn at_offset(block: Dense<F>, rhs: Vec<F>, first_row: usize) -> Self {
        debug_assert_eq!(block.nr_rows(), rhs.len());
        trace!(
            "Partition created: rows {}..{} ({} columns)",
            first_row, first_row + block.nr_rows(), block.nr_columns(),
        );

        Self { block, rhs, first_row, }
    }

    /// Number of rows.
    pub fn nr_rows(&self) -> usize {
        self.block.nr_rows()
    }

    /// Number of columns, equal for all partitions of a matrix.
    pub fn nr_columns(&self) -> usize {
        self.block.nr_columns()
    }

    /// Index of the first row in the original matrix.
    pub fn first_row(&self) -> usize {
        self.first_row
    }

    /// The rows of the matrix.
    pub fn block(&self) -> &Dense<F> {
        &self.block
    }

    /// The right-hand side values of the rows.
    pub fn rhs(&self) -> &[F] {
        &self.rhs
    }

    /// Remove the first `n` rows and return them as a new partition.
    ///
    /// The number of rows is clamped to the number of rows available.
    pub fn split_head(&mut self, n: usize) -> Self {
        let block = self.block.split_head(n);
        let nr_moved = block.nr_rows();
        let tail = self.rhs.split_off(nr_moved);
        let rhs = mem::replace(&mut self.rhs, tail);

        let first_row = self.first_row;
        self.first_row += nr_moved;

        Self::at_offset(block, rhs, first_row)
    }

    /// Remove the last `n` rows and return them as a new partition.
    ///
    /// The number of rows is clamped to the number of rows available.
    pub fn split_tail(&mut self, n: usize) -> Self {
        let block = self.block.split_tail(n);
        let rhs = self.rhs.split_off(self.rhs.len() - block.nr_rows());

        Self::at_offset(block, rhs, self.first_row + self.nr_rows())
    }

    /// Cut into consecutive partitions with the given row counts.
    ///
    /// # Arguments
    ///
    /// * `sizes`: Row counts, in order. Their sum should be equal to the number of rows.
    pub fn split_sizes(mut self, sizes: &[usize]) -> Vec<Self> {
        debug_assert_eq!(sizes.iter().sum::<usize>(), self.nr_rows());

        sizes.iter().map(|&size| self.split_head(size)).collect()
    }

    /// Cut into `count` partitions with as equal as possible row counts.
    ///
    /// The first `nr_rows % count` partitions get one row more than the others.
    pub fn split_evenly(self, count: usize) -> Vec<Self> {
        let sizes = even_sizes(self.nr_rows(), count);
        self.split_sizes(&sizes)
    }

    /// Cut into partitions of `block_rows` rows.
    ///
    /// Remaining rows that don't fill a complete block are added to the last block.
    pub fn split_blocks(self, block_rows: usize) -> Vec<Self> {
        let sizes = block_sizes(self.nr_rows(), block_rows);
        self.split_sizes(&sizes)
    }
}

impl<F> Drop for Partition<F> {
    fn drop(&mut self) {
        trace!("Partition released: rows {}..{}", self.first_row, self.first_row + self.nr_rows());
    }
}

/// Row counts of `count` blocks that together have `nr_rows` rows.
///
/// Block sizes differ by at most one, larger blocks first.
pub fn even_sizes(nr_rows: usize, count: usize) -> Vec<usize> {
    debug_assert!(count > 0);

    let (base, extra) = (nr_rows / count, nr_rows % count);
    (0..count).map(|i| if i < extra { base + 1 } else { base }).collect()
}

/// Row counts of blocks of `block_rows` rows that together have `nr_rows` rows.
///
/// The last block absorbs the rows that don't fill a block.
pub fn block_sizes(nr_rows: usize, block_rows: usize) -> Vec<usize> {
    debug_assert!(block_rows > 0);

    let count = (nr_rows / block_rows).max(1);
    let mut sizes = vec![block_rows.min(nr_rows); count];
    if let Some(last) = sizes.last_mut() {
        *last += nr_rows - count * block_rows.min(nr_rows);
    }

    sizes
}
