//! Intensity normalization.

use crate::math::extrema::nan_max;

/// Scale `y` by its own maximum so the strongest sample becomes 1.
///
/// Idempotent for data with a positive maximum. A NaN sample poisons the
/// whole output; an all-zero input divides to NaN/Inf. Neither is sanitized.
pub fn max_normalize(y: &[f64]) -> Vec<f64> {
    let max = nan_max(y.iter().copied());
    y.iter().map(|v| v / max).collect()
}
