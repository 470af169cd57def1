//! NaN-propagating extrema.
//!
//! `f64::min` / `f64::max` ignore NaN operands. The reductions here poison
//! the result instead, so a NaN sample in an input spectrum stays visible
//! downstream.

/// Minimum of a sequence; NaN anywhere yields NaN. Empty input yields `+inf`.
pub fn nan_min(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::INFINITY, |acc, v| {
        if acc.is_nan() || v.is_nan() {
            f64::NAN
        } else if v < acc {
            v
        } else {
            acc
        }
    })
}

/// Maximum of a sequence; NaN anywhere yields NaN. Empty input yields `-inf`.
pub fn nan_max(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::NEG_INFINITY, |acc, v| {
        if acc.is_nan() || v.is_nan() {
            f64::NAN
        } else if v > acc {
            v
        } else {
            acc
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_extrema() {
        let values = [3.0, 1.0, 2.0];
        assert_eq!(nan_min(values.iter().copied()), 1.0);
        assert_eq!(nan_max(values.iter().copied()), 3.0);
    }

    #[test]
    fn nan_poisons_the_result() {
        let values = [3.0, f64::NAN, 2.0];
        assert!(nan_min(values.iter().copied()).is_nan());
        assert!(nan_max(values.iter().copied()).is_nan());
    }
}
