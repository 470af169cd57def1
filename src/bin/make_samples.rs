//! Deterministic synthetic-spectra generator for demos and manual runs.
//!
//! Writes Gaussian-band FTIR / XRD / UV-Vis text files in the formats the
//! `spectra` loaders expect, plus an anatase reference-peak list, so the
//! whole pipeline can be exercised without instrument data.
//!
//! Usage: `make-samples [OUT_DIR]` (default `samples/`).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::StandardNormal;

/// FTIR absorption bands as (center cm⁻¹, width, depth).
const FTIR_ANATASE: &[(f64, f64, f64)] = &[
    (3420.0, 120.0, 0.22), // O-H stretch
    (1635.0, 45.0, 0.12),  // H-O-H bend
    (680.0, 160.0, 0.45),  // Ti-O-Ti
];
const FTIR_RUTILE: &[(f64, f64, f64)] =
    &[(3400.0, 130.0, 0.15), (1630.0, 45.0, 0.08), (610.0, 140.0, 0.50)];

/// XRD peaks as (2θ deg for Cu Kα, relative intensity 0-100).
const XRD_ANATASE: &[(f64, f64)] = &[
    (25.28, 100.0),
    (36.95, 10.0),
    (37.80, 20.0),
    (48.05, 35.0),
    (53.89, 20.0),
    (55.06, 20.0),
    (62.69, 14.0),
    (75.03, 10.0),
];
const XRD_RUTILE: &[(f64, f64)] = &[
    (27.45, 100.0),
    (36.09, 50.0),
    (39.19, 8.0),
    (41.23, 25.0),
    (44.05, 10.0),
    (54.32, 60.0),
    (56.64, 20.0),
    (62.74, 10.0),
    (64.04, 10.0),
    (69.01, 20.0),
];

/// Anatase reference peaks as (d-spacing Å, relative intensity).
const REF_ANATASE: &[(f64, f64)] = &[
    (3.5200, 100.0),
    (2.4310, 10.0),
    (2.3780, 20.0),
    (1.8920, 35.0),
    (1.6999, 20.0),
    (1.6665, 20.0),
    (1.4808, 14.0),
    (1.3641, 6.0),
];

fn main() -> io::Result<()> {
    let dir = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "samples".to_string()),
    );
    fs::create_dir_all(&dir)?;

    let mut rng = StdRng::seed_from_u64(42);

    write_ftir(&dir.join("ftir_anatase.txt"), FTIR_ANATASE, &mut rng)?;
    write_ftir(&dir.join("ftir_rutile.txt"), FTIR_RUTILE, &mut rng)?;
    write_xrd(&dir.join("xrd_anatase.txt"), XRD_ANATASE, &mut rng)?;
    write_xrd(&dir.join("xrd_rutile.txt"), XRD_RUTILE, &mut rng)?;
    // Absorption edges at ~3.2 eV (anatase) and ~3.0 eV (rutile); one file
    // carries a header row to exercise the loader's auto-detect.
    write_uvvis(&dir.join("uvvis_anatase.txt"), 387.0, true, &mut rng)?;
    write_uvvis(&dir.join("uvvis_rutile.txt"), 413.0, false, &mut rng)?;
    write_reference(&dir.join("reference_anatase.txt"), REF_ANATASE)?;

    println!("wrote 7 sample files under {}", dir.display());
    Ok(())
}

/// Two columns (wavenumber, transmittance), no header, 4000 -> 400 cm⁻¹.
fn write_ftir(path: &Path, bands: &[(f64, f64, f64)], rng: &mut StdRng) -> io::Result<()> {
    let mut out = String::new();
    let mut wn = 4000.0;
    while wn >= 400.0 {
        let absorbed: f64 = bands
            .iter()
            .map(|&(mu, sigma, depth)| gaussian(wn, mu, sigma, depth))
            .sum();
        let t = (0.95 - absorbed + 0.002 * noise(rng)).clamp(0.0, 1.0);
        out.push_str(&format!("{wn:.1}\t{t:.5}\n"));
        wn -= 2.0;
    }
    write_file(path, &out)
}

/// One header row, then two columns (2θ, counts), 20 -> 80 deg.
fn write_xrd(path: &Path, peaks: &[(f64, f64)], rng: &mut StdRng) -> io::Result<()> {
    let mut out = String::from("2theta\tcounts\n");
    for k in 0..=1200 {
        let angle = 20.0 + 0.05 * k as f64;
        let signal: f64 = peaks
            .iter()
            .map(|&(center, rel)| gaussian(angle, center, 0.12, 18.0 * rel))
            .sum();
        let counts = (45.0 + signal + 3.0 * noise(rng)).max(0.0);
        out.push_str(&format!("{angle:.2}\t{counts:.1}\n"));
    }
    write_file(path, &out)
}

/// Tab-delimited (wavelength, absorbance), 350 -> 800 nm, sigmoid edge.
fn write_uvvis(path: &Path, edge_nm: f64, header: bool, rng: &mut StdRng) -> io::Result<()> {
    let mut out = String::new();
    if header {
        out.push_str("wavelength_nm\tabsorbance\n");
    }
    for k in 0..=450 {
        let wl = 350.0 + k as f64;
        let a = 1.6 / (1.0 + ((wl - edge_nm) / 12.0).exp()) + 0.04 + 0.003 * noise(rng);
        out.push_str(&format!("{wl:.1}\t{a:.5}\n"));
    }
    write_file(path, &out)
}

/// Two columns (d-spacing, intensity), no header.
fn write_reference(path: &Path, peaks: &[(f64, f64)]) -> io::Result<()> {
    let mut out = String::new();
    for &(d, i) in peaks {
        out.push_str(&format!("{d:.4}\t{i:.0}\n"));
    }
    write_file(path, &out)
}

fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    fs::write(path, contents)?;
    println!("wrote {}", path.display());
    Ok(())
}

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

fn noise(rng: &mut StdRng) -> f64 {
    rng.sample(StandardNormal)
}
