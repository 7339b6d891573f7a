//! # Randomly generated tall and skinny problems
//!
//! All generators are seeded, so every run sees the same matrices.
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use tsqr::data::linear_algebra::dense::Dense;
use tsqr::data::linear_algebra::triangular::UpperTriangular;
use tsqr::data::problem::LeastSquares;

/// # Tree properties on generated problems
mod test;

/// A matrix with entries uniformly drawn from `[-1, 1)`.
fn random_matrix(rng: &mut StdRng, nr_rows: usize, nr_columns: usize) -> Dense<f64> {
    Dense::from_fn(nr_rows, nr_columns, |_, _| rng.gen_range(-1_f64..1_f64))
}

/// A problem with random data on both sides.
fn random_problem(seed: u64, nr_rows: usize, nr_columns: usize) -> LeastSquares<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let matrix = random_matrix(&mut rng, nr_rows, nr_columns);
    let rhs = (0..nr_rows).map(|_| rng.gen_range(-1_f64..1_f64)).collect();

    LeastSquares::new(matrix, rhs).unwrap()
}

/// A problem of which `x` is an exact solution.
fn consistent_problem(seed: u64, nr_rows: usize, x: &[f64]) -> LeastSquares<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let matrix = random_matrix(&mut rng, nr_rows, x.len());
    let rhs = product(&matrix, x);

    LeastSquares::new(matrix, rhs).unwrap()
}

/// `Ax`
fn product(matrix: &Dense<f64>, x: &[f64]) -> Vec<f64> {
    matrix.rows()
        .map(|row| row.iter().zip(x).map(|(a, x)| a * x).sum())
        .collect()
}

/// `AᵗA`
fn gram(matrix: &Dense<f64>) -> Dense<f64> {
    let size = matrix.nr_columns();
    Dense::from_fn(size, size, |i, j| {
        matrix.rows().map(|row| row[i] * row[j]).sum()
    })
}

/// `RᵗR`
fn gram_of_factor(factor: &UpperTriangular<f64>) -> Dense<f64> {
    let size = factor.size();
    Dense::from_fn(size, size, |i, j| {
        (0..=i.min(j)).map(|k| factor.get(k, i) * factor.get(k, j)).sum()
    })
}

/// `||Ax - b||`
fn residual_norm(problem: &LeastSquares<f64>, x: &[f64]) -> f64 {
    product(problem.matrix(), x).iter()
        .zip(problem.rhs())
        .map(|(ax, b)| (ax - b) * (ax - b))
        .sum::<f64>()
        .sqrt()
}

fn assert_close(left: &Dense<f64>, right: &Dense<f64>, epsilon: f64) {
    assert_eq!(left.nr_rows(), right.nr_rows());
    assert_eq!(left.nr_columns(), right.nr_columns());
    for (a, b) in left.data().iter().zip(right.data()) {
        approx::assert_abs_diff_eq!(*a, *b, epsilon = epsilon);
    }
}
