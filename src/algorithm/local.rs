//! # Local factorization
//!
//! Each partition is factored on its own. Its right-hand side is transformed with the same
//! orthogonal transform, which turns the partition into a leaf of the reduction tree.
use log::trace;
use num_traits::Zero;

use crate::algorithm::kernel::QrKernel;
use crate::algorithm::ops::Scalar;
use crate::algorithm::reduction::Node;
use crate::data::linear_algebra::triangular::UpperTriangular;
use crate::data::partition::Partition;
use crate::error::{Error, Result};

/// Factorization `B = QR` of a single partition.
#[derive(Debug)]
pub struct LocalFactorization<F, R> {
    factor: UpperTriangular<F>,
    record: R,
    nr_rows: usize,
}

impl<F: Scalar, R> LocalFactorization<F, R> {
    /// The triangular factor `R`.
    pub fn factor(&self) -> &UpperTriangular<F> {
        &self.factor
    }

    /// Transform a vector with the rows of the partition to the basis of the factor.
    ///
    /// # Arguments
    ///
    /// * `kernel`: The kernel that computed this factorization.
    /// * `rhs`: One value for each row of the partition.
    ///
    /// # Return value
    ///
    /// The first `C` values of `Qᵗb`, paired with the factor, and the squared norm of the
    /// remaining values, which no choice of solution can reduce.
    ///
    /// # Errors
    ///
    /// When `rhs` doesn't have a value for each row of the partition.
    pub fn project<K>(&self, kernel: &K, rhs: &[F]) -> Result<(Vec<F>, F)>
    where
        K: QrKernel<F, Record = R>,
    {
        if rhs.len() != self.nr_rows {
            return Err(Error::RightHandSide { rows: self.nr_rows, values: rhs.len() });
        }

        let mut transformed = rhs.to_vec();
        kernel.apply(&self.record, &mut transformed);
        let discarded = transformed.split_off(self.factor.size());

        Ok((transformed, sum_of_squares(&discarded)))
    }

    /// Turn the factorization and the transformed right-hand side into a leaf of the tree.
    ///
    /// # Errors
    ///
    /// See `project`.
    pub fn into_leaf<K>(self, kernel: &K, rhs: &[F]) -> Result<Node<F>>
    where
        K: QrKernel<F, Record = R>,
    {
        let (contribution, residual_squared) = self.project(kernel, rhs)?;
        Ok(Node::new(self.factor, contribution, residual_squared))
    }
}

/// Factor a single partition.
///
/// The partition is not changed.
///
/// # Arguments
///
/// * `kernel`: Dense QR primitive.
/// * `partition`: Rows to factor.
/// * `index`: Position of the partition, for error reporting.
///
/// # Errors
///
/// When the partition has fewer rows than columns, or when the kernel fails.
pub fn factor<F, K>(
    kernel: &K,
    partition: &Partition<F>,
    index: usize,
) -> Result<LocalFactorization<F, K::Record>>
where
    F: Scalar,
    K: QrKernel<F>,
{
    let (nr_rows, nr_columns) = (partition.nr_rows(), partition.nr_columns());
    if nr_rows < nr_columns {
        return Err(Error::UnderdeterminedBlock { partition: Some(index), rows: nr_rows, columns: nr_columns });
    }

    trace!("Factoring partition {} (rows {}..{})", index, partition.first_row(), partition.first_row() + nr_rows);
    let (factor, record) = kernel.factor(partition.block())?;
    debug_assert_eq!(factor.size(), nr_columns);

    Ok(LocalFactorization { factor, record, nr_rows, })
}

/// Factor a partition and transform its right-hand side.
///
/// # Errors
///
/// See `factor`.
pub fn leaf<F, K>(kernel: &K, partition: &Partition<F>, index: usize) -> Result<Node<F>>
where
    F: Scalar,
    K: QrKernel<F>,
{
    factor(kernel, partition, index)?.into_leaf(kernel, partition.rhs())
}

pub(crate) fn sum_of_squares<F: Scalar>(values: &[F]) -> F {
    values.iter().fold(F::zero(), |total, &value| total + value * value)
}
