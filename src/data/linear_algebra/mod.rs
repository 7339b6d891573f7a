//! # Linear algebra primitives
//!
//! Dense storage for the tall design matrix, its row blocks and the triangular factors.

pub mod dense;
pub mod triangular;
