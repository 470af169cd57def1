//! Central-difference differentiation and pre-smoothing.

/// First derivative via central differences over interior samples.
///
/// Returns `(x', dy/dx)` where `x'` drops the first and last sample. Inputs
/// shorter than 3 samples, or of mismatched length, produce empty outputs.
/// Repeated x values make the divisor zero; the resulting Inf/NaN entries are
/// propagated unchecked.
pub fn differentiate(x: &[f64], y: &[f64]) -> (Vec<f64>, Vec<f64>) {
    if x.len() != y.len() || x.len() < 3 {
        return (Vec::new(), Vec::new());
    }

    let n = x.len();
    let mut xs = Vec::with_capacity(n - 2);
    let mut slopes = Vec::with_capacity(n - 2);
    for i in 1..n - 1 {
        xs.push(x[i]);
        slopes.push((y[i + 1] - y[i - 1]) / (x[i + 1] - x[i - 1]));
    }
    (xs, slopes)
}

/// Centered moving average with edge clamping.
///
/// Output length equals input length. `window <= 1` returns the input
/// unchanged; even windows widen to the next odd width so the kernel stays
/// centered.
pub fn smooth(y: &[f64], window: usize) -> Vec<f64> {
    if window <= 1 || y.is_empty() {
        return y.to_vec();
    }

    let half = window / 2;
    let n = y.len();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let lo = i.saturating_sub(half);
        let hi = (i + half).min(n - 1);
        let neighborhood = &y[lo..=hi];
        out.push(neighborhood.iter().sum::<f64>() / neighborhood.len() as f64);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_the_parabola_slope() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [0.0, 1.0, 4.0, 9.0, 16.0];

        let (xs, slopes) = differentiate(&x, &y);

        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
        for (slope, expected) in slopes.iter().zip([2.0, 4.0, 6.0]) {
            assert!((slope - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn short_input_yields_empty_output() {
        let (xs, slopes) = differentiate(&[0.0, 1.0], &[0.0, 1.0]);
        assert!(xs.is_empty());
        assert!(slopes.is_empty());
    }

    #[test]
    fn repeated_x_is_propagated_not_sanitized() {
        let (_, slopes) = differentiate(&[0.0, 1.0, 0.0], &[0.0, 1.0, 2.0]);
        assert!(slopes[0].is_infinite());
    }

    #[test]
    fn smooth_with_unit_window_is_identity() {
        let y = [1.0, 5.0, 2.0];
        assert_eq!(smooth(&y, 1), y.to_vec());
        assert_eq!(smooth(&y, 0), y.to_vec());
    }

    #[test]
    fn smooth_averages_with_clamped_edges() {
        let y = [1.0, 2.0, 3.0, 4.0, 5.0];
        let smoothed = smooth(&y, 3);

        let expected = [1.5, 2.0, 3.0, 4.0, 4.5];
        for (got, want) in smoothed.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn even_window_widens_to_odd() {
        let y = [0.0, 0.0, 6.0, 0.0, 0.0];
        // Window 4 behaves like 5: every sample sees the single spike.
        let smoothed = smooth(&y, 4);
        assert!((smoothed[0] - 2.0).abs() < 1e-12);
        assert!((smoothed[2] - 1.2).abs() < 1e-12);
    }
}
