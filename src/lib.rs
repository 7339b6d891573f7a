//! # A tall-skinny least-squares solver
//!
//! Overdetermined systems `Ax ≈ b` with many more rows than columns are solved by splitting `A`
//! into row blocks, computing a QR factorization of each block and merging the resulting
//! triangular factors pairwise through a binary reduction tree (TSQR). The orthogonal transforms
//! are replayed on the right-hand side along the way, so that the final triangular system can be
//! solved by back-substitution.
#![warn(missing_docs)]

pub mod algorithm;
pub mod config;
pub mod data;
pub mod error;
pub mod io;

pub use crate::error::{Error, Result};
