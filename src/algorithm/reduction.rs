//! # Reduction tree
//!
//! The triangular factors of all partitions are merged pairwise until a single factor remains.
//!
//! Two factors `R_a` and `R_b` are stacked into a `2C x C` matrix, which is factored again. Because
//! `[R_a; R_b]ᵗ[R_a; R_b] = R_aᵗR_a + R_bᵗR_b`, the new factor describes the rows of both
//! partitions. The stacked right-hand side contributions are transformed with the new `Qᵗ`, and its
//! first `C` values become the contribution of the merged node.
//!
//! Nodes are always paired with their right neighbour, left to right, and a trailing node without
//! a neighbour moves up a level unchanged. This fixes the shape of the tree for a given number of
//! leaves, so that results are reproducible to the bit, whether nodes are combined in parallel or
//! not.
use std::mem;

use itertools::Itertools;
use log::debug;
use rayon::prelude::*;

use crate::algorithm::kernel::QrKernel;
use crate::algorithm::local::sum_of_squares;
use crate::algorithm::ops::Scalar;
use crate::data::linear_algebra::triangular::UpperTriangular;
use crate::error::{Error, Result};

/// A triangular factor with the right-hand side values in its basis.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<F> {
    factor: UpperTriangular<F>,
    contribution: Vec<F>,
    /// Squared norm of all right-hand side values that were split off below this node.
    residual_squared: F,
}

impl<F> Node<F> {
    /// Create a new node.
    ///
    /// # Arguments
    ///
    /// * `factor`: Square upper triangular factor of size `C`.
    /// * `contribution`: `C` right-hand side values.
    /// * `residual_squared`: Part of the squared residual norm that is already known.
    pub fn new(factor: UpperTriangular<F>, contribution: Vec<F>, residual_squared: F) -> Self {
        debug_assert_eq!(factor.size(), contribution.len());

        Self { factor, contribution, residual_squared, }
    }

    /// The triangular factor.
    pub fn factor(&self) -> &UpperTriangular<F> {
        &self.factor
    }

    /// Right-hand side values matching the rows of the factor.
    pub fn contribution(&self) -> &[F] {
        &self.contribution
    }

    /// Squared norm of the part of the right-hand side that the factor can't reach.
    pub fn residual_squared(&self) -> F
    where
        F: Copy,
    {
        self.residual_squared
    }

    /// Split into the factor, the contribution and the squared residual.
    pub fn into_parts(self) -> (UpperTriangular<F>, Vec<F>, F) {
        (self.factor, self.contribution, self.residual_squared)
    }
}

/// Shape of a completed reduction.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct TreeStatistics {
    /// Number of leaves, the number of partitions.
    pub leaves: usize,
    /// Number of levels above the leaves, `⌈log2 leaves⌉`.
    pub depth: usize,
    /// Number of combine steps, one less than the number of leaves.
    pub combines: usize,
}

/// Result of reducing all leaves.
#[derive(Debug, Clone, PartialEq)]
pub struct Reduction<F> {
    /// The single remaining node.
    pub root: Node<F>,
    /// Shape of the tree.
    pub statistics: TreeStatistics,
}

/// Merge two nodes into one.
///
/// `top` should be the node of the rows that come first in the original matrix.
///
/// # Errors
///
/// When the factors differ in size, when a contribution doesn't match its factor, or when the
/// kernel fails to factor the stacked factors.
pub fn combine<F, K>(kernel: &K, top: Node<F>, bottom: Node<F>) -> Result<Node<F>>
where
    F: Scalar,
    K: QrKernel<F>,
{
    let size = top.factor.size();
    if bottom.factor.size() != size {
        return Err(Error::ColumnMismatch { partition: None, expected: size, found: bottom.factor.size() });
    }
    for node in [&top, &bottom] {
        if node.contribution.len() != size {
            return Err(Error::RightHandSide { rows: size, values: node.contribution.len() });
        }
    }

    let (top_factor, mut rhs, top_residual) = top.into_parts();
    let (bottom_factor, bottom_rhs, bottom_residual) = bottom.into_parts();

    let mut stacked = top_factor.into_dense();
    stacked.append_rows(bottom_factor.into_dense());
    rhs.extend(bottom_rhs);

    let (factor, record) = kernel.factor(&stacked)?;
    kernel.apply(&record, &mut rhs);
    let discarded = rhs.split_off(size);

    let residual_squared = top_residual + bottom_residual + sum_of_squares(&discarded);
    Ok(Node::new(factor, rhs, residual_squared))
}

/// Combine the nodes of one level of the tree.
///
/// Adjacent nodes are combined left to right, a trailing node without a neighbour is moved to the
/// end of the next level as is.
///
/// # Arguments
///
/// * `kernel`: Dense QR primitive.
/// * `level`: Nodes, in the order of the rows they represent.
/// * `parallel`: Whether to combine pairs on the rayon thread pool.
///
/// # Return value
///
/// `⌈n / 2⌉` nodes, still in row order.
///
/// # Errors
///
/// If any combine step fails. Other pairs of the level may be computed anyway, but their results
/// are dropped.
pub fn reduce_level<F, K>(kernel: &K, mut level: Vec<Node<F>>, parallel: bool) -> Result<Vec<Node<F>>>
where
    F: Scalar,
    K: QrKernel<F>,
{
    let carried = if level.len() % 2 == 1 { level.pop() } else { None };

    let pairs = level.into_iter().tuples::<(_, _)>().collect::<Vec<_>>();
    let mut next = if parallel {
        pairs.into_par_iter()
            .map(|(top, bottom)| combine(kernel, top, bottom))
            .collect::<Result<Vec<_>>>()?
    } else {
        pairs.into_iter()
            .map(|(top, bottom)| combine(kernel, top, bottom))
            .collect::<Result<Vec<_>>>()?
    };
    next.extend(carried);

    Ok(next)
}

/// Reduce all leaves to a single node.
///
/// The levels are processed one after the other, so every combine step only starts once both of
/// its inputs are known.
///
/// # Arguments
///
/// * `kernel`: Dense QR primitive.
/// * `leaves`: One node for each partition, in row order.
/// * `parallel`: Whether the nodes of a level are combined on the rayon thread pool.
///
/// # Errors
///
/// When there are no leaves, or when a combine step fails. In the latter case, the whole
/// reduction is abandoned.
pub fn reduce<F, K>(kernel: &K, leaves: Vec<Node<F>>, parallel: bool) -> Result<Reduction<F>>
where
    F: Scalar,
    K: QrKernel<F>,
{
    let mut statistics = TreeStatistics { leaves: leaves.len(), ..TreeStatistics::default() };
    let mut level = leaves;
    while level.len() > 1 {
        let nr_nodes = level.len();
        level = reduce_level(kernel, mem::take(&mut level), parallel)?;

        statistics.depth += 1;
        statistics.combines += nr_nodes / 2;
        debug!("Reduced tree level {}: {} nodes to {}", statistics.depth, nr_nodes, level.len());
    }

    level.pop()
        .map(|root| Reduction { root, statistics })
        .ok_or_else(|| Error::InvalidConfig("can't reduce without any partitions".to_string()))
}
