//! Bragg's law conversion from lattice spacing to diffraction angle.

/// Diffraction angle 2θ in degrees for a d-spacing and radiation wavelength,
/// both in Angstroms.
///
/// Spacings too small for the wavelength (`λ / 2d > 1`) put the arcsine
/// outside its domain and yield NaN; callers drop such rows.
pub fn two_theta_deg(d_spacing: f64, wavelength: f64) -> f64 {
    2.0 * (wavelength / (2.0 * d_spacing)).asin().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacing_equal_to_wavelength_diffracts_at_sixty_degrees() {
        // sin(θ) = 1/2.
        let two_theta = two_theta_deg(1.5406, 1.5406);
        assert!((two_theta - 60.0).abs() < 1e-9);
    }

    #[test]
    fn grazing_limit_is_one_eighty() {
        let two_theta = two_theta_deg(0.77, 1.54);
        assert!((two_theta - 180.0).abs() < 1e-9);
    }

    #[test]
    fn spacing_below_half_wavelength_is_nan() {
        assert!(two_theta_deg(0.5, 1.5406).is_nan());
    }
}
