//! Shared pipeline logic behind the CLI subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> transform -> fit
//!
//! The CLI layer then focuses on presentation (reports, charts, exports);
//! pipelines print nothing and return all computed outputs.

use crate::domain::{
    Curve, DerivConfig, FitWindow, FtirConfig, LabeledPath, OverlayLine, TaucAnalysis, TaucConfig,
    UvVisConfig, XrdConfig,
};
use crate::error::{AppError, ErrorKind};
use crate::fit::bandgap::estimate_bandgap;
use crate::fit::linear::{evaluate_line, fit_linear};
use crate::io::ingest::{load_ftir, load_reference_peaks, load_uvvis, load_xrd};
use crate::math::deriv::{differentiate, smooth};
use crate::math::normalize::max_normalize;
use crate::math::stack::stack_curve_set;
use crate::math::tauc::tauc_transform;

/// Outputs of a stacked-overlay run (`ftir`, `uvvis`).
#[derive(Debug, Clone)]
pub struct StackRun {
    /// Curves as loaded, before stacking.
    pub raw: Vec<Curve>,
    /// The same curves with stacking offsets applied, in input order.
    pub stacked: Vec<Curve>,
}

/// Outputs of an `xrd` run: stacked patterns plus reference peak positions.
#[derive(Debug, Clone)]
pub struct XrdRun {
    pub raw: Vec<Curve>,
    pub stacked: Vec<Curve>,
    /// Reference peaks as (2θ, relative intensity) curves.
    pub reference: Vec<Curve>,
}

/// Outputs of a `tauc` run.
#[derive(Debug, Clone)]
pub struct TaucRun {
    /// Tauc-transformed curves (photon energy, Tauc coordinate).
    pub transformed: Vec<Curve>,
    /// Per-curve fit results; fits are `None` when no windows were given.
    pub analyses: Vec<TaucAnalysis>,
}

/// Outputs of a `deriv` run.
#[derive(Debug, Clone)]
pub struct DerivRun {
    /// First derivatives, two samples shorter than their sources.
    pub derivatives: Vec<Curve>,
}

/// Execute the `ftir` pipeline.
pub fn run_ftir(config: &FtirConfig) -> Result<StackRun, AppError> {
    // 1) Load every spectrum.
    let raw = load_all(&config.inputs, load_ftir)?;

    // 2) Apply stacking offsets.
    ensure_uniform_grid(&raw)?;
    let stacked = stack_curve_set(raw.clone(), config.percent);

    Ok(StackRun { raw, stacked })
}

/// Execute the `uvvis` pipeline.
pub fn run_uvvis(config: &UvVisConfig) -> Result<StackRun, AppError> {
    // 1) Load every spectrum.
    let raw = load_all(&config.inputs, load_uvvis)?;

    // 2) Apply stacking offsets.
    ensure_uniform_grid(&raw)?;
    let stacked = stack_curve_set(raw.clone(), config.percent);

    Ok(StackRun { raw, stacked })
}

/// Execute the `xrd` pipeline.
pub fn run_xrd(config: &XrdConfig) -> Result<XrdRun, AppError> {
    // 1) Load every pattern (already scaled to relative intensity).
    let raw = load_all(&config.inputs, load_xrd)?;

    // 2) Apply stacking offsets.
    ensure_uniform_grid(&raw)?;
    let stacked = stack_curve_set(raw.clone(), config.percent);

    // 3) Load reference peaks and rescale them onto the same relative axis.
    let mut reference = Vec::with_capacity(config.reference.len());
    for input in &config.reference {
        let mut peaks = load_reference_peaks(input, config.wavelength)?;
        peaks.y = max_normalize(&peaks.y);
        reference.push(peaks);
    }

    Ok(XrdRun {
        raw,
        stacked,
        reference,
    })
}

/// Execute the `tauc` pipeline.
pub fn run_tauc(config: &TaucConfig) -> Result<TaucRun, AppError> {
    // 1) Load UV-Vis spectra.
    let raw = load_all(&config.inputs, load_uvvis)?;

    // 2) Tauc-transform each curve.
    let transformed: Vec<Curve> = raw
        .iter()
        .map(|curve| {
            let (energy, tauc_y) = tauc_transform(&curve.x, &curve.y, config.power);
            Curve::new(curve.label.clone(), energy, tauc_y)
        })
        .collect();

    // 3) Fit whatever windows were requested.
    let mut analyses = Vec::with_capacity(transformed.len());
    for curve in &transformed {
        analyses.push(analyze_curve(curve, config.baseline, config.edge)?);
    }

    Ok(TaucRun {
        transformed,
        analyses,
    })
}

/// Execute the `deriv` pipeline.
pub fn run_deriv(config: &DerivConfig) -> Result<DerivRun, AppError> {
    // 1) Load UV-Vis spectra.
    let raw = load_all(&config.inputs, load_uvvis)?;

    // 2) Smooth (optional), then differentiate.
    let mut derivatives = Vec::with_capacity(raw.len());
    for curve in &raw {
        let smoothed = smooth(&curve.y, config.smooth);
        let (x, dydx) = differentiate(&curve.x, &smoothed);
        if x.is_empty() {
            return Err(AppError::new(
                ErrorKind::InsufficientData,
                format!(
                    "'{}' holds {} sample(s); differentiation needs at least 3",
                    curve.label,
                    curve.len()
                ),
            ));
        }
        derivatives.push(Curve::new(curve.label.clone(), x, dydx));
    }

    Ok(DerivRun { derivatives })
}

fn load_all(
    inputs: &[LabeledPath],
    load: fn(&LabeledPath) -> Result<Curve, AppError>,
) -> Result<Vec<Curve>, AppError> {
    inputs.iter().map(load).collect()
}

/// Stacking subtracts curves pointwise, so a run's spectra must share one grid.
fn ensure_uniform_grid(curves: &[Curve]) -> Result<(), AppError> {
    for pair in curves.windows(2) {
        if pair[1].len() != pair[0].len() {
            return Err(AppError::new(
                ErrorKind::FileFormat,
                format!(
                    "'{}' has {} sample(s) but '{}' has {}; stacked spectra must share one x-grid",
                    pair[0].label,
                    pair[0].len(),
                    pair[1].label,
                    pair[1].len()
                ),
            ));
        }
    }
    Ok(())
}

/// Fit the requested windows on one transformed curve.
///
/// Both windows yield a full bandgap estimate (two lines + intersection);
/// a single window yields that line only; none yields a bare analysis.
fn analyze_curve(
    curve: &Curve,
    baseline: Option<FitWindow>,
    edge: Option<FitWindow>,
) -> Result<TaucAnalysis, AppError> {
    match (baseline, edge) {
        (Some(b), Some(e)) => {
            let estimate = estimate_bandgap(&curve.x, &curve.y, b, e)?;
            Ok(TaucAnalysis::from_bandgap(curve.label.clone(), estimate))
        }
        (Some(window), None) => Ok(TaucAnalysis {
            label: curve.label.clone(),
            baseline: Some(fit_overlay(curve, window)?),
            edge: None,
            gap: None,
        }),
        (None, Some(window)) => Ok(TaucAnalysis {
            label: curve.label.clone(),
            baseline: None,
            edge: Some(fit_overlay(curve, window)?),
            gap: None,
        }),
        (None, None) => Ok(TaucAnalysis {
            label: curve.label.clone(),
            baseline: None,
            edge: None,
            gap: None,
        }),
    }
}

fn fit_overlay(curve: &Curve, window: FitWindow) -> Result<OverlayLine, AppError> {
    let fit = fit_linear(&curve.x, &curve.y, window)?;
    let points = evaluate_line(&fit, &curve.x);
    Ok(OverlayLine { fit, points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlotOptions;
    use std::fs;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("spectra-pipeline-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    fn plot_options() -> PlotOptions {
        PlotOptions {
            out: PathBuf::from("unused.png"),
            width: 1024,
            height: 768,
        }
    }

    fn labeled(label: &str, path: &PathBuf) -> LabeledPath {
        LabeledPath {
            label: label.to_string(),
            path: path.clone(),
        }
    }

    #[test]
    fn ftir_run_stacks_in_input_order() {
        let a = write_temp("ftir-a.txt", "400\t1.0\n500\t0.0\n600\t1.0\n");
        let b = write_temp("ftir-b.txt", "400\t0.5\n500\t0.5\n600\t0.5\n");
        let config = FtirConfig {
            inputs: vec![labeled("a", &a), labeled("b", &b)],
            percent: 10.0,
            plot: plot_options(),
        };

        let run = run_ftir(&config).unwrap();
        fs::remove_file(a).ok();
        fs::remove_file(b).ok();

        assert_eq!(run.raw.len(), 2);
        assert_eq!(run.stacked[0].y, run.raw[0].y);
        // b's lowest point clears a by 10% of a's unit range.
        let clearance = run.stacked[1]
            .y
            .iter()
            .zip(&run.stacked[0].y)
            .map(|(s, r)| s - r)
            .fold(f64::INFINITY, f64::min);
        assert!((clearance - 0.1).abs() < 1e-12);
    }

    #[test]
    fn deriv_run_recovers_a_parabola_slope() {
        let file = write_temp("deriv.txt", "0\t0\n1\t1\n2\t4\n3\t9\n4\t16\n");
        let config = DerivConfig {
            inputs: vec![labeled("sq", &file)],
            smooth: 0,
            export_csv: None,
            plot: plot_options(),
        };

        let run = run_deriv(&config).unwrap();
        fs::remove_file(file).ok();

        assert_eq!(run.derivatives[0].x, vec![1.0, 2.0, 3.0]);
        assert_eq!(run.derivatives[0].y, vec![2.0, 4.0, 6.0]);
    }

    #[test]
    fn deriv_run_needs_three_samples() {
        let file = write_temp("deriv-short.txt", "0\t0\n1\t1\n");
        let config = DerivConfig {
            inputs: vec![labeled("s", &file)],
            smooth: 0,
            export_csv: None,
            plot: plot_options(),
        };

        let err = run_deriv(&config).unwrap_err();
        fs::remove_file(file).ok();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
    }

    #[test]
    fn mismatched_grids_are_rejected_before_stacking() {
        let a = write_temp("grid-a.txt", "400\t1.0\n500\t0.0\n600\t1.0\n");
        let b = write_temp("grid-b.txt", "400\t0.5\n500\t0.5\n");
        let config = FtirConfig {
            inputs: vec![labeled("a", &a), labeled("b", &b)],
            percent: 10.0,
            plot: plot_options(),
        };

        let err = run_ftir(&config).unwrap_err();
        fs::remove_file(a).ok();
        fs::remove_file(b).ok();

        assert_eq!(err.kind(), ErrorKind::FileFormat);
    }

    #[test]
    fn tauc_run_without_windows_keeps_analyses_bare() {
        let file = write_temp("tauc.txt", "500\t1.0\n510\t0.9\n520\t0.8\n");
        let config = TaucConfig {
            inputs: vec![labeled("s1", &file)],
            transition: crate::domain::Transition::Direct,
            power: 2.0,
            baseline: None,
            edge: None,
            export_json: None,
            export_csv: None,
            plot: plot_options(),
        };

        let run = run_tauc(&config).unwrap();
        fs::remove_file(file).ok();

        assert_eq!(run.transformed.len(), 1);
        // 500 nm lands near 2.48 eV; energy descends as wavelength grows.
        assert!((run.transformed[0].x[0] - 2.4797).abs() < 1e-3);
        assert!(run.transformed[0].x[0] > run.transformed[0].x[2]);
        let analysis = &run.analyses[0];
        assert!(analysis.baseline.is_none() && analysis.edge.is_none() && analysis.gap.is_none());
    }
}
