use approx::assert_abs_diff_eq;

use tsqr::algorithm::{factorize, partition, SolveLeastSquares};
use tsqr::algorithm::kernel::Householder;
use tsqr::config::{Layout, SolverConfig};
use tsqr::data::linear_algebra::dense::Dense;
use tsqr::data::partition::Partition;
use tsqr::data::problem::LeastSquares;
use tsqr::error::Error;

use super::{assert_close, consistent_problem, gram, gram_of_factor, random_problem, residual_norm};

#[test]
fn two_partitions_keep_gram_matrix() {
    let problem = random_problem(1, 40, 5);
    let expected = gram(problem.matrix());

    let partitions = partition(problem, Layout::Partitions(2));
    assert_eq!(partitions.len(), 2);
    let reduction = factorize(&Householder, partitions, false).unwrap();

    assert_eq!(reduction.statistics.leaves, 2);
    assert_eq!(reduction.statistics.depth, 1);
    assert_eq!(reduction.statistics.combines, 1);
    assert_close(&gram_of_factor(reduction.root.factor()), &expected, 1e-10);
}

#[test]
fn exact_solution_is_recovered() {
    let x = [2_f64, -1_f64, 0.5, 3_f64, -4_f64, 0.25];
    for count in 1..=7 {
        let problem = consistent_problem(2, 100, &x);
        let config = SolverConfig::default().with_layout(Layout::Partitions(count));
        let solution = problem.solve(&config).unwrap();

        for (found, expected) in solution.x.iter().zip(&x) {
            assert_abs_diff_eq!(*found, *expected, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(solution.residual_norm, 0_f64, epsilon = 1e-9);
    }
}

#[test]
fn solution_independent_of_tree_shape() {
    let problem = random_problem(3, 64, 4);
    let reference = problem.clone()
        .solve(&SolverConfig::default().with_layout(Layout::Partitions(1)))
        .unwrap();

    let layouts = [
        Layout::Partitions(2),
        Layout::Partitions(3),
        Layout::Partitions(5),
        Layout::Partitions(16),
        Layout::BlockRows(4),
        Layout::BlockRows(9),
    ];
    for layout in layouts {
        let solution = problem.clone().solve(&SolverConfig::default().with_layout(layout)).unwrap();
        for (found, expected) in solution.x.iter().zip(&reference.x) {
            assert_abs_diff_eq!(*found, *expected, epsilon = 1e-10);
        }
        assert_abs_diff_eq!(solution.residual_norm, reference.residual_norm, epsilon = 1e-10);
        assert_close(&gram_of_factor(&solution.factor), &gram_of_factor(&reference.factor), 1e-10);
    }
}

#[test]
fn residual_norm_matches_solution() {
    let problem = random_problem(4, 50, 3);
    let solution = problem.clone()
        .solve(&SolverConfig::default().with_layout(Layout::Partitions(4)))
        .unwrap();

    assert!(solution.residual_norm > 0_f64);
    assert_abs_diff_eq!(solution.residual_norm, residual_norm(&problem, &solution.x), epsilon = 1e-10);
}

#[test]
fn solution_is_stationary() {
    let problem = random_problem(5, 30, 4);
    let solution = problem.clone().solve(&SolverConfig::default()).unwrap();

    let mut shifted = solution.x.clone();
    shifted[2] += 1e-3;
    assert!(residual_norm(&problem, &shifted) > solution.residual_norm);
}

#[test]
fn zero_partition_changes_nothing() {
    let nr_columns = 3;
    let problem = random_problem(6, 30, nr_columns);
    let three = partition(problem, Layout::Partitions(3));

    let mut four = three.clone();
    let zeros = Dense::from_fn(nr_columns, nr_columns, |_, _| 0_f64);
    four.push(Partition::new(zeros, vec![0_f64; nr_columns]).unwrap());

    let from_three = factorize(&Householder, three, false).unwrap();
    let from_four = factorize(&Householder, four, false).unwrap();
    assert_eq!(from_four.statistics.leaves, 4);
    assert_eq!(from_four.statistics.depth, 2);

    assert_close(
        &gram_of_factor(from_three.root.factor()),
        &gram_of_factor(from_four.root.factor()),
        1e-10,
    );
    assert_abs_diff_eq!(
        from_three.root.residual_squared(),
        from_four.root.residual_squared(),
        epsilon = 1e-10,
    );
}

#[test]
fn parallel_is_deterministic() {
    let problem = random_problem(7, 200, 6);
    let layout = Layout::BlockRows(12);

    let serial = problem.clone()
        .solve(&SolverConfig::default().with_layout(layout).with_parallel(false))
        .unwrap();
    let parallel = problem
        .solve(&SolverConfig::default().with_layout(layout).with_parallel(true))
        .unwrap();

    assert_eq!(serial, parallel);
}

#[test]
fn rank_deficient() {
    let problem = random_problem(9, 20, 3);
    let matrix = problem.matrix();
    // Third column is the sum of the first two
    let columns = Dense::from_fn(20, 3, |i, j| {
        if j == 2 { matrix[(i, 0)] + matrix[(i, 1)] } else { matrix[(i, j)] }
    });
    let deficient = LeastSquares::new(columns, problem.rhs().to_vec()).unwrap();

    let result = deficient.solve(&SolverConfig::default().with_layout(Layout::Partitions(2)));
    assert!(matches!(result, Err(Error::SingularFactor { index: 2, .. })));
}
