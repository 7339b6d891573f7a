//! # Triangular solve
//!
//! Solving `Rx = y` for an upper triangular `R`, starting at the last row.
use num_traits::Zero;

use crate::algorithm::ops::{from_f64, magnitude, Scalar, to_f64};
use crate::data::linear_algebra::triangular::UpperTriangular;
use crate::error::{Error, Result};

/// Find the first diagonal entry that is too small to divide by.
///
/// An entry is too small when its magnitude is below `relative_tolerance` times the largest
/// diagonal magnitude. Exact zeros are always too small, also when the whole diagonal is zero.
///
/// # Errors
///
/// `SingularFactor` with the lowest offending index.
pub fn check_diagonal<F: Scalar>(factor: &UpperTriangular<F>, relative_tolerance: f64) -> Result<()> {
    let largest = factor.diagonal()
        .map(|&value| magnitude(value))
        .fold(F::zero(), |largest, value| if value > largest { value } else { largest });
    let threshold = from_f64::<F>(relative_tolerance) * largest;

    let singular = factor.diagonal()
        .map(|&value| magnitude(value))
        .position(|value| value < threshold || value == F::zero());

    match singular {
        None => Ok(()),
        Some(index) => Err(Error::SingularFactor {
            index,
            magnitude: to_f64(magnitude(*factor.get(index, index))),
            threshold: to_f64(threshold),
        }),
    }
}

/// Solve `Rx = y`.
///
/// # Arguments
///
/// * `factor`: Upper triangular `R` of size `C`.
/// * `rhs`: `C` values `y`.
/// * `relative_tolerance`: See `check_diagonal`.
///
/// # Return value
///
/// The `C` values `x`.
///
/// # Errors
///
/// When the factor is (numerically) singular, or when the lengths don't match.
pub fn back_substitute<F: Scalar>(
    factor: &UpperTriangular<F>,
    rhs: &[F],
    relative_tolerance: f64,
) -> Result<Vec<F>> {
    let size = factor.size();
    if rhs.len() != size {
        return Err(Error::RightHandSide { rows: size, values: rhs.len() });
    }
    check_diagonal(factor, relative_tolerance)?;

    let mut solution = vec![F::zero(); size];
    for i in (0..size).rev() {
        let known = factor.right_of_diagonal(i).iter()
            .zip(&solution[i + 1..])
            .fold(F::zero(), |total, (&r, &x)| total + r * x);
        solution[i] = (rhs[i] - known) / *factor.get(i, i);
    }

    Ok(solution)
}
