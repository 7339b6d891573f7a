//! # Storing of least-squares problems in memory
//!
//! This module provides the data structures used to represent a problem and its row blocks in
//! memory. Algorithms introduce their own data structures in `algorithm`.

pub mod linear_algebra;
pub mod partition;
pub mod problem;
