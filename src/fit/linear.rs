//! Windowed ordinary least-squares line fits.

use crate::domain::{FitWindow, LineFit};
use crate::error::{AppError, ErrorKind};
use crate::math::ols;

/// Fit `y = slope * x + intercept` over the samples inside `window`.
///
/// Both window bounds are inclusive. Fewer than 2 selected samples, or a
/// window with no x-variation, cannot determine a line and fail with
/// `InsufficientData`.
pub fn fit_linear(x: &[f64], y: &[f64], window: FitWindow) -> Result<LineFit, AppError> {
    let mut sel_x = Vec::new();
    let mut sel_y = Vec::new();
    for (&xi, &yi) in x.iter().zip(y) {
        if window.contains(xi) {
            sel_x.push(xi);
            sel_y.push(yi);
        }
    }

    if sel_x.len() < 2 {
        return Err(AppError::new(
            ErrorKind::InsufficientData,
            format!(
                "fit window [{}, {}] holds {} sample(s); a line fit needs at least 2",
                window.low,
                window.high,
                sel_x.len()
            ),
        ));
    }
    if sel_x.iter().all(|&v| v == sel_x[0]) {
        return Err(AppError::new(
            ErrorKind::InsufficientData,
            format!(
                "fit window [{}, {}] has no x-variation; a line is underdetermined",
                window.low, window.high
            ),
        ));
    }

    let (slope, intercept, covariance) = ols::fit_line(&sel_x, &sel_y).ok_or_else(|| {
        AppError::new(
            ErrorKind::InsufficientData,
            format!(
                "least-squares solve failed in window [{}, {}]",
                window.low, window.high
            ),
        )
    })?;

    Ok(LineFit {
        slope,
        intercept,
        covariance,
        n_points: sel_x.len(),
        window,
    })
}

/// Evaluate a fitted line at every x sample, for overlay rendering.
pub fn evaluate_line(fit: &LineFit, x: &[f64]) -> Vec<(f64, f64)> {
    x.iter().map(|&xi| (xi, fit.predict(xi))).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_a_clean_line() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 5.0, 7.0];

        let fit = fit_linear(&x, &y, FitWindow::new(0.0, 3.0)).unwrap();

        assert!((fit.slope - 2.0).abs() < 1e-10);
        assert!((fit.intercept - 1.0).abs() < 1e-10);
        assert_eq!(fit.n_points, 4);

        // Residuals of the recovered line are essentially zero.
        for (&xi, &yi) in x.iter().zip(&y) {
            assert!((fit.predict(xi) - yi).abs() < 1e-10);
        }
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 5.0, 7.0];

        let fit = fit_linear(&x, &y, FitWindow::new(1.0, 2.0)).unwrap();
        assert_eq!(fit.n_points, 2);
    }

    #[test]
    fn under_two_samples_is_insufficient() {
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 1.0, 2.0];

        let err = fit_linear(&x, &y, FitWindow::new(0.9, 1.1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
    }

    #[test]
    fn empty_window_is_insufficient() {
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 1.0, 2.0];

        let err = fit_linear(&x, &y, FitWindow::new(5.0, 6.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
    }

    #[test]
    fn no_x_variation_is_insufficient() {
        let x = [1.0, 1.0, 1.0];
        let y = [0.0, 1.0, 2.0];

        let err = fit_linear(&x, &y, FitWindow::new(0.0, 2.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
    }

    #[test]
    fn nan_x_never_enters_a_window() {
        let x = [0.0, f64::NAN, 2.0, 3.0];
        let y = [1.0, 100.0, 5.0, 7.0];

        let fit = fit_linear(&x, &y, FitWindow::new(0.0, 3.0)).unwrap();
        assert_eq!(fit.n_points, 3);
        assert!((fit.slope - 2.0).abs() < 1e-10);
    }
}
