//! Bandgap estimation from Tauc-plot geometry.
//!
//! A Tauc plot has a flat background region below the gap and a steep,
//! nearly linear absorption edge above it. Fitting a line through each and
//! intersecting them gives the gap energy.

use crate::domain::{BandgapEstimate, FitWindow};
use crate::error::{AppError, ErrorKind};
use crate::fit::linear::{evaluate_line, fit_linear};

/// Relative slope separation below which two fits count as parallel.
///
/// Two least-squares solves of the same underlying line disagree in the
/// last few ulps; separations at that level carry no usable intersection.
const PARALLEL_SLOPE_EPS: f64 = 1e-12;

/// Estimate the bandgap of a Tauc-transformed curve.
///
/// Fits one line over the `baseline` window and one over the `edge` window,
/// then intersects them. Either fit failing propagates its error; slopes
/// separated by less than solver noise have no usable intersection and fail
/// with `DegenerateFit` instead of the arbitrary point a raw division would
/// produce.
pub fn estimate_bandgap(
    x: &[f64],
    y: &[f64],
    baseline: FitWindow,
    edge: FitWindow,
) -> Result<BandgapEstimate, AppError> {
    let baseline_fit = fit_linear(x, y, baseline)?;
    let edge_fit = fit_linear(x, y, edge)?;

    let separation = (edge_fit.slope - baseline_fit.slope).abs();
    if separation <= PARALLEL_SLOPE_EPS * edge_fit.slope.abs().max(baseline_fit.slope.abs()) {
        return Err(AppError::new(
            ErrorKind::DegenerateFit,
            format!(
                "baseline and edge fits are parallel (slope {}); no intersection exists",
                edge_fit.slope
            ),
        ));
    }

    let energy_ev =
        (baseline_fit.intercept - edge_fit.intercept) / (edge_fit.slope - baseline_fit.slope);
    let tauc_at_gap = edge_fit.predict(energy_ev);

    Ok(BandgapEstimate {
        energy_ev,
        tauc_at_gap,
        baseline_line: evaluate_line(&baseline_fit, x),
        edge_line: evaluate_line(&edge_fit, x),
        baseline: baseline_fit,
        edge: edge_fit,
    })
}
