//! # Solver configuration
//!
//! Settings are fixed for the duration of a solve. They are usually filled in from the command
//! line, see the `tsqr` binary.
use crate::error::{Error, Result};

/// Diagonal values of the final factor below this fraction of the largest diagonal value are
/// treated as zero.
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-12;
/// Number of partitions when nothing else is specified.
pub const DEFAULT_PARTITIONS: usize = 4;

/// How the rows of the matrix are divided over partitions.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Layout {
    /// A fixed number of partitions with (nearly) equal row counts.
    ///
    /// The count is lowered when there are not enough rows to give each partition at least as
    /// many rows as columns.
    Partitions(usize),
    /// Partitions with a fixed number of rows, the last partition taking the remaining rows.
    BlockRows(usize),
}

/// Settings for a single factorization and solve.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Division of the rows over partitions.
    pub layout: Layout,
    /// Relative threshold below which a diagonal value of the final factor counts as zero.
    pub relative_tolerance: f64,
    /// Whether to factor partitions and combine nodes on the rayon thread pool.
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            layout: Layout::Partitions(DEFAULT_PARTITIONS),
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            parallel: true,
        }
    }
}

impl SolverConfig {
    /// Use a different row division.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Use a different singularity threshold.
    #[must_use]
    pub fn with_relative_tolerance(mut self, relative_tolerance: f64) -> Self {
        self.relative_tolerance = relative_tolerance;
        self
    }

    /// Switch parallel execution on or off.
    ///
    /// Results are identical either way.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check that the settings can be used.
    ///
    /// # Errors
    ///
    /// When the partition count or block size is zero, or when the tolerance is negative or not
    /// finite.
    pub fn validate(&self) -> Result<()> {
        match self.layout {
            Layout::Partitions(0) => return Err(Error::InvalidConfig(
                "the number of partitions should be at least 1".to_string(),
            )),
            Layout::BlockRows(0) => return Err(Error::InvalidConfig(
                "the number of rows per block should be at least 1".to_string(),
            )),
            _ => {},
        }

        if !self.relative_tolerance.is_finite() || self.relative_tolerance < 0_f64 {
            return Err(Error::InvalidConfig(format!(
                "the relative tolerance should be a finite, non-negative number, not {}",
                self.relative_tolerance,
            )));
        }

        Ok(())
    }
}
