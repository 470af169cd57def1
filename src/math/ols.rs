//! Least squares solver for line fits.
//!
//! Every fit in this project is a two-parameter line over a windowed subset
//! of samples. We solve the tall system via SVD rather than normal-equation
//! factorizations:
//!
//! - SVD handles tall (rows > columns) design matrices directly.
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic
//!   for non-square matrices.)
//! - With only 2 columns, SVD cost is negligible.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Ordinary least-squares line fit `y = slope * x + intercept`.
///
/// Returns the coefficients and their 2x2 covariance (slope first), estimated
/// as `sigma^2 (X^T X)^-1` with `sigma^2 = SSE / max(n - 2, 1)`, so an exact
/// two-point fit reports zero variance instead of dividing by zero.
///
/// Returns `None` when the solve fails or the design matrix cannot be
/// inverted (no x-variation).
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<(f64, f64, [[f64; 2]; 2])> {
    let n = x.len();
    debug_assert_eq!(n, y.len());

    let mut design = DMatrix::zeros(n, 2);
    for (i, &xi) in x.iter().enumerate() {
        design[(i, 0)] = 1.0;
        design[(i, 1)] = xi;
    }
    let rhs = DVector::from_column_slice(y);

    let beta = solve_least_squares(&design, &rhs)?;
    let intercept = beta[0];
    let slope = beta[1];

    let xtx = design.transpose() * &design;
    let xtx_inv = xtx.try_inverse()?;

    let sse: f64 = x
        .iter()
        .zip(y)
        .map(|(&xi, &yi)| {
            let residual = yi - (slope * xi + intercept);
            residual * residual
        })
        .sum();
    let sigma2 = sse / n.saturating_sub(2).max(1) as f64;

    // Reorder from (intercept, slope) to (slope, intercept).
    let covariance = [
        [sigma2 * xtx_inv[(1, 1)], sigma2 * xtx_inv[(1, 0)]],
        [sigma2 * xtx_inv[(0, 1)], sigma2 * xtx_inv[(0, 0)]],
    ];

    Some((slope, intercept, covariance))
}
