//! Vertical stacking offsets for overlay plots.
//!
//! Stacked spectra share one set of axes; each curve is raised above the
//! previous one by a percentage of that curve's vertical range so the traces
//! never overlap.

use crate::domain::Curve;
use crate::math::extrema::{nan_max, nan_min};

/// Raise `target` above `reference` by `percent` of `reference`'s range.
///
/// Returns `target` unchanged when the two arrays are element-wise identical.
/// Otherwise the shifted curve's lowest point relative to `reference` sits
/// exactly `percent / 100 * (max(reference) - min(reference))` above it.
/// NaN inputs propagate into the output unsanitized.
///
/// # Panics
///
/// Panics when the two slices have different lengths.
pub fn stack_by_percent(reference: &[f64], target: &[f64], percent: f64) -> Vec<f64> {
    assert_eq!(
        reference.len(),
        target.len(),
        "stacked curves must have the same sample count"
    );

    if reference.iter().zip(target).all(|(r, t)| r == t) {
        return target.to_vec();
    }

    let delta0 = nan_min(reference.iter().zip(target).map(|(r, t)| *t - *r));
    let range = nan_max(reference.iter().copied()) - nan_min(reference.iter().copied());
    let delta1 = range * percent / 100.0;

    target.iter().map(|t| t - delta0 + delta1).collect()
}

/// Stack a curve set in order.
///
/// The first curve is the unshifted baseline; every later curve is raised
/// above the previous *shifted* curve, so offsets accumulate down the set.
pub fn stack_curve_set(curves: Vec<Curve>, percent: f64) -> Vec<Curve> {
    let mut out: Vec<Curve> = Vec::with_capacity(curves.len());
    for mut curve in curves {
        if let Some(prev) = out.last() {
            curve.y = stack_by_percent(&prev.y, &curve.y, percent);
        }
        out.push(curve);
    }
    out
}
