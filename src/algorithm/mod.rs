//! # Algorithms
//!
//! Solving a least-squares problem happens in four steps:
//!
//! 1. The rows are divided over partitions.
//! 2. Each partition is factored independently, see `local`.
//! 3. The factors are merged pairwise until one remains, see `reduction`.
//! 4. The remaining triangular system is solved, see `back_substitution`.
use log::{debug, info};
use nalgebra::ComplexField;
use rayon::prelude::*;

use crate::algorithm::back_substitution::back_substitute;
use crate::algorithm::kernel::{Householder, QrKernel};
use crate::algorithm::local::leaf;
use crate::algorithm::ops::Scalar;
use crate::algorithm::reduction::{reduce, Reduction, TreeStatistics};
use crate::config::{Layout, SolverConfig};
use crate::data::linear_algebra::triangular::UpperTriangular;
use crate::data::partition::Partition;
use crate::data::problem::LeastSquares;
use crate::error::{Error, Result};

pub mod back_substitution;
pub mod kernel;
pub mod local;
pub mod ops;
pub mod reduction;

/// A problem that can be solved in the least-squares sense.
pub trait SolveLeastSquares<F> {
    /// Solve using a specific dense QR primitive.
    ///
    /// # Errors
    ///
    /// When the configuration is invalid, a partition can't be factored, or when the matrix is
    /// (numerically) rank deficient. No partial result is returned.
    fn solve_with<K: QrKernel<F>>(self, kernel: &K, config: &SolverConfig) -> Result<Solution<F>>;

    /// Solve using Householder QR.
    ///
    /// # Errors
    ///
    /// See `solve_with`.
    fn solve(self, config: &SolverConfig) -> Result<Solution<F>>
    where
        Self: Sized,
        Householder: QrKernel<F>,
    {
        self.solve_with(&Householder, config)
    }
}

/// The least-squares solution together with information about how it was computed.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<F> {
    /// Values minimizing `||Ax - b||`, one for each column of `A`.
    pub x: Vec<F>,
    /// Upper triangular `R` such that `RᵗR = AᵗA`.
    pub factor: UpperTriangular<F>,
    /// The minimal value of `||Ax - b||`.
    pub residual_norm: F,
    /// Shape of the reduction tree.
    pub statistics: TreeStatistics,
}

impl<F: Scalar> SolveLeastSquares<F> for LeastSquares<F> {
    fn solve_with<K: QrKernel<F>>(self, kernel: &K, config: &SolverConfig) -> Result<Solution<F>> {
        config.validate()?;

        let (nr_rows, nr_columns) = (self.nr_rows(), self.nr_columns());
        let partitions = partition(self, config.layout);
        info!("Factoring {} x {} matrix in {} partitions", nr_rows, nr_columns, partitions.len());

        let Reduction { root, statistics } = factorize(kernel, partitions, config.parallel)?;
        let (factor, contribution, residual_squared) = root.into_parts();

        let x = back_substitute(&factor, &contribution, config.relative_tolerance)?;
        let residual_norm = ComplexField::sqrt(residual_squared);
        info!(
            "Solved with a reduction tree of depth {} ({} combines)",
            statistics.depth, statistics.combines,
        );

        Ok(Solution { x, factor, residual_norm, statistics, })
    }
}

/// Divide the rows of a problem over partitions.
///
/// With `Layout::Partitions`, the count is capped such that every partition has at least as many
/// rows as columns.
pub fn partition<F>(problem: LeastSquares<F>, layout: Layout) -> Vec<Partition<F>> {
    let (nr_rows, nr_columns) = (problem.nr_rows(), problem.nr_columns());
    let whole = problem.into_partition();

    match layout {
        Layout::Partitions(count) => {
            let limit = (nr_rows / nr_columns.max(1)).max(1);
            if count > limit {
                debug!("Lowering the partition count from {} to {}, the blocks would be too short", count, limit);
            }
            whole.split_evenly(count.min(limit).max(1))
        },
        Layout::BlockRows(block_rows) => whole.split_blocks(block_rows.max(1)),
    }
}

/// Factor all partitions and reduce them to a single node.
///
/// # Arguments
///
/// * `kernel`: Dense QR primitive.
/// * `partitions`: Row blocks, in order. They are released once factored.
/// * `parallel`: Whether to factor partitions and combine nodes on the rayon thread pool.
///
/// # Errors
///
/// When there are no partitions, the partitions differ in their number of columns, a partition
/// has fewer rows than columns, or when the kernel fails anywhere in the tree.
pub fn factorize<F, K>(kernel: &K, partitions: Vec<Partition<F>>, parallel: bool) -> Result<Reduction<F>>
where
    F: Scalar,
    K: QrKernel<F>,
{
    if let Some(first) = partitions.first() {
        let expected = first.nr_columns();
        if let Some((index, partition)) = partitions.iter()
            .enumerate()
            .find(|(_, partition)| partition.nr_columns() != expected) {
            return Err(Error::ColumnMismatch { partition: Some(index), expected, found: partition.nr_columns() });
        }
    }

    let leaves = if parallel {
        partitions.into_par_iter()
            .enumerate()
            .map(|(index, partition)| leaf(kernel, &partition, index))
            .collect::<Result<Vec<_>>>()?
    } else {
        partitions.into_iter()
            .enumerate()
            .map(|(index, partition)| leaf(kernel, &partition, index))
            .collect::<Result<Vec<_>>>()?
    };

    reduce(kernel, leaves, parallel)
}
