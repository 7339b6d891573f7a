use std::fs;

use approx::assert_abs_diff_eq;
use tempfile::TempDir;

use tsqr::algorithm::SolveLeastSquares;
use tsqr::config::{Layout, SolverConfig};
use tsqr::data::linear_algebra::dense::Dense;
use tsqr::data::problem::LeastSquares;
use tsqr::error::Error;
use tsqr::io::error::LoadError;
use tsqr::io::load;

use super::get_test_file_path;

fn line() -> LeastSquares<f64> {
    let values = load(&get_test_file_path("line")).unwrap();
    LeastSquares::from_flat(values, 4, 2).unwrap()
}

#[test]
fn line_two_partitions() {
    let config = SolverConfig::default().with_layout(Layout::Partitions(2));
    let solution = line().solve(&config).unwrap();

    assert_eq!(solution.x.len(), 2);
    assert_abs_diff_eq!(solution.x[0], 3.5, epsilon = 1e-10);
    assert_abs_diff_eq!(solution.x[1], 1.4, epsilon = 1e-10);
    assert_abs_diff_eq!(solution.residual_norm, 4.2_f64.sqrt(), epsilon = 1e-10);
}

#[test]
fn line_any_layout() {
    let layouts = [
        Layout::Partitions(1),
        Layout::Partitions(2),
        Layout::BlockRows(2),
        Layout::BlockRows(3),
    ];
    for layout in layouts {
        for parallel in [false, true] {
            let config = SolverConfig::default().with_layout(layout).with_parallel(parallel);
            let solution = line().solve(&config).unwrap();
            assert_abs_diff_eq!(solution.x[0], 3.5, epsilon = 1e-10);
            assert_abs_diff_eq!(solution.x[1], 1.4, epsilon = 1e-10);
        }
    }
}

#[test]
fn separate_rhs_file() {
    let mut matrix: Dense<f64> = load(&get_test_file_path("line_matrix")).unwrap();
    matrix.reshape(4, 2).unwrap();
    let rhs = load(&get_test_file_path("line_rhs")).unwrap().into_data();

    let problem = LeastSquares::new(matrix, rhs).unwrap();
    assert_eq!(problem, line());
}

#[test]
fn wrong_shape() {
    let values: Dense<f64> = load(&get_test_file_path("line")).unwrap();
    let result = LeastSquares::from_flat(values, 3, 2);
    assert!(matches!(result, Err(Error::ValueCount { values: 12, rows: 3, columns: 2 })));

    let mut values: Dense<f64> = load(&get_test_file_path("line_matrix")).unwrap();
    assert!(matches!(values.reshape(3, 3), Err(Error::ShapeMismatch { elements: 8, rows: 3, columns: 3 })));

    // Row counts from the command line can be arbitrarily large
    assert!(matches!(values.reshape(usize::MAX, 2), Err(Error::ShapeMismatch { elements: 8, .. })));
    let values: Dense<f64> = load(&get_test_file_path("line")).unwrap();
    assert!(matches!(LeastSquares::from_flat(values, usize::MAX, 2), Err(Error::ValueCount { .. })));
}

#[test]
fn malformed() {
    match load::<f64>(&get_test_file_path("malformed")) {
        Err(LoadError::Parse(error)) => {
            assert_eq!(error.token(), "three");
            assert_eq!(error.line_number(), 3);
            assert_eq!(error.parsed(), 5);
        },
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn missing_file() {
    let directory = TempDir::new().unwrap();
    let result = load::<f64>(&directory.path().join("absent.txt"));
    assert!(matches!(result, Err(LoadError::IO(_))));
}

#[test]
fn written_file() {
    let directory = TempDir::new().unwrap();
    let path = directory.path().join("plane.txt");
    // y = 1 + 2 s - t, exactly
    let points = [(0_f64, 0_f64), (1_f64, 0_f64), (0_f64, 1_f64), (1_f64, 1_f64), (2_f64, 3_f64), (3_f64, 1_f64)];
    let mut text = String::new();
    for (s, t) in points {
        text.push_str(&format!("1 {} {}\n", s, t));
    }
    for (s, t) in points {
        text.push_str(&format!("{} ", 1_f64 + 2_f64 * s - t));
    }
    fs::write(&path, text).unwrap();

    let problem = LeastSquares::from_flat(load::<f64>(&path).unwrap(), 6, 3).unwrap();
    let solution = problem.solve(&SolverConfig::default().with_layout(Layout::Partitions(2))).unwrap();
    assert_abs_diff_eq!(solution.x[0], 1_f64, epsilon = 1e-10);
    assert_abs_diff_eq!(solution.x[1], 2_f64, epsilon = 1e-10);
    assert_abs_diff_eq!(solution.x[2], -1_f64, epsilon = 1e-10);
    assert_abs_diff_eq!(solution.residual_norm, 0_f64, epsilon = 1e-10);
}
