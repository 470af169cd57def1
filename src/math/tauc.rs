//! Tauc transform for optical bandgap analysis.
//!
//! Converts (wavelength, absorbance) samples into (photon energy, Tauc
//! coordinate) samples. Plotted against energy, the Tauc coordinate has a
//! linear absorption edge whose extrapolation to the baseline estimates the
//! bandgap.

/// Planck constant (J s).
pub const H_PLANCK: f64 = 6.626_070_15e-34;
/// Speed of light in vacuum (m/s).
pub const C_LIGHT: f64 = 2.997_924_58e8;
/// Elementary charge (C).
pub const E_CHARGE: f64 = 1.602_176_634e-19;

/// Photon energy in eV for a wavelength in nm.
pub fn photon_energy_ev(wavelength_nm: f64) -> f64 {
    (H_PLANCK * C_LIGHT * 1e9 / wavelength_nm) / E_CHARGE
}

/// Tauc transform: `energy = hc/λ`, `tauc_y = (absorbance * 100 * energy)^power`.
///
/// The absorption coefficient is taken as `absorbance * 100` (per cm).
/// Zero or negative wavelengths, and fractional powers of negative values,
/// yield NaN/Inf entries; nothing is sanitized here.
pub fn tauc_transform(
    wavelength_nm: &[f64],
    absorbance: &[f64],
    power: f64,
) -> (Vec<f64>, Vec<f64>) {
    let energy: Vec<f64> = wavelength_nm.iter().map(|&w| photon_energy_ev(w)).collect();
    let tauc_y: Vec<f64> = energy
        .iter()
        .zip(absorbance)
        .map(|(&e, &a)| (a * 100.0 * e).powf(power))
        .collect();
    (energy, tauc_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn green_photon_reference_values() {
        // 500 nm, absorbance 1.0, direct convention.
        let (energy, tauc_y) = tauc_transform(&[500.0], &[1.0], 2.0);

        assert!((energy[0] - 2.4797).abs() < 1e-4);
        assert!((tauc_y[0] - 61488.3).abs() < 0.5);
    }

    #[test]
    fn indirect_power_takes_the_square_root() {
        let (energy, tauc_y) = tauc_transform(&[500.0], &[1.0], 0.5);
        assert!((tauc_y[0] - (100.0 * energy[0]).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn negative_absorbance_under_fractional_power_is_nan() {
        let (_, tauc_y) = tauc_transform(&[500.0], &[-1.0], 0.5);
        assert!(tauc_y[0].is_nan());
    }

    #[test]
    fn zero_wavelength_is_not_sanitized() {
        let (energy, _) = tauc_transform(&[0.0], &[1.0], 2.0);
        assert!(energy[0].is_infinite());
    }
}
