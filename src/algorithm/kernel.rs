//! # Dense QR primitive
//!
//! The factorization of a single dense block and the application of its orthogonal transform are
//! delegated to a dense linear algebra library. The reduction only relies on the contract of the
//! `QrKernel` trait.
use nalgebra::{DMatrix, DVector, Dyn};
use nalgebra::linalg::QR;

use crate::algorithm::ops::Scalar;
use crate::data::linear_algebra::dense::Dense;
use crate::data::linear_algebra::triangular::UpperTriangular;
use crate::error::{Error, Result};

/// Factor a block `B = QR` and replay `Qᵗ` on vectors.
///
/// Implementations should be deterministic: the same block gives bit-identical results.
pub trait QrKernel<F>: Sync {
    /// Whatever is needed to apply `Qᵗ` later, typically the Householder reflectors.
    type Record: Send;

    /// Factor a block.
    ///
    /// # Arguments
    ///
    /// * `block`: Matrix with at least as many rows as columns.
    ///
    /// # Return value
    ///
    /// The square upper triangular factor `R`, which has as many columns as `block`, and the
    /// record of the transform.
    ///
    /// # Errors
    ///
    /// When the block can't be factored.
    fn factor(&self, block: &Dense<F>) -> Result<(UpperTriangular<F>, Self::Record)>;

    /// Compute `Qᵗv` in place.
    ///
    /// # Arguments
    ///
    /// * `record`: Transform of a block with as many rows as `vector` has values.
    /// * `vector`: Afterwards, the first values correspond to the rows of `R`.
    fn apply(&self, record: &Self::Record, vector: &mut [F]);
}

/// Householder QR as implemented by `nalgebra`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Householder;

impl<F: Scalar> QrKernel<F> for Householder {
    type Record = QR<F, Dyn, Dyn>;

    fn factor(&self, block: &Dense<F>) -> Result<(UpperTriangular<F>, Self::Record)> {
        let (nr_rows, nr_columns) = (block.nr_rows(), block.nr_columns());
        if nr_rows < nr_columns {
            return Err(Error::FactorizationFailure {
                reason: format!("can't factor a {} x {} block, it is wider than it is tall", nr_rows, nr_columns),
            });
        }
        if let Some(index) = block.data().iter().position(|value| !value.is_finite()) {
            return Err(Error::FactorizationFailure {
                reason: format!(
                    "value at row {}, column {} is not finite",
                    index / nr_columns, index % nr_columns,
                ),
            });
        }

        let decomposition = QR::new(DMatrix::from_row_slice(nr_rows, nr_columns, block.data()));
        // At least as many rows as columns, so this is square
        let r = decomposition.r();
        let factor = UpperTriangular::from_fn(nr_columns, |i, j| r[(i, j)]);

        if factor.diagonal().any(|value| !value.is_finite()) {
            return Err(Error::FactorizationFailure {
                reason: "the triangular factor contains values that are not finite".to_string(),
            });
        }

        Ok((factor, decomposition))
    }

    fn apply(&self, record: &Self::Record, vector: &mut [F]) {
        let mut column = DVector::from_column_slice(vector);
        record.q_tr_mul(&mut column);
        vector.copy_from_slice(column.as_slice());
    }
}
