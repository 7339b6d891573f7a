//! # Number operations
//!
//! Operations the element type needs to support to be factored and solved.
use std::str::FromStr;

use nalgebra::{ComplexField, RealField};
use num_traits::ToPrimitive;

/// Real floating point numbers that can be read from text and shared between threads.
///
/// Implemented for `f32` and `f64`.
pub trait Scalar: RealField + ToPrimitive + Copy + FromStr + Send + Sync {}

impl<T> Scalar for T
where
    T: RealField + ToPrimitive + Copy + FromStr + Send + Sync,
{}

/// Convert a value to `f64`, for error reporting.
pub(crate) fn to_f64<F: Scalar>(value: F) -> f64 {
    ToPrimitive::to_f64(&value).unwrap_or(f64::NAN)
}

/// Convert a setting to the element type.
pub(crate) fn from_f64<F: Scalar>(value: f64) -> F {
    nalgebra::convert::<f64, F>(value)
}

/// Absolute value.
pub(crate) fn magnitude<F: Scalar>(value: F) -> F {
    ComplexField::abs(value)
}
