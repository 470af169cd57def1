//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during transforms and fitting
//! - exported to JSON/CSV
//! - reloaded later for external tooling or comparisons

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Optical transition convention for the Tauc exponent.
///
/// The Tauc coordinate is `(αhν)^power`. For allowed transitions the standard
/// conventions are `power = 2` (direct gap) and `power = 1/2` (indirect gap).
/// Legacy data processed with the opposite mapping can be reproduced exactly
/// via the `--power` override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Transition {
    Direct,
    Indirect,
}

impl Transition {
    /// Tauc exponent implied by the transition type.
    pub fn power(self) -> f64 {
        match self {
            Transition::Direct => 2.0,
            Transition::Indirect => 0.5,
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            Transition::Direct => "direct",
            Transition::Indirect => "indirect",
        }
    }
}

/// A measured spectrum: parallel x/y samples plus a legend label.
///
/// Invariant: `x.len() == y.len() >= 1`. No ordering requirement on x
/// (stacking and fitting do not need monotonic wavelengths).
#[derive(Debug, Clone)]
pub struct Curve {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Curve {
    pub fn new(label: impl Into<String>, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            x,
            y,
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Inclusive x-interval selecting the samples that enter a linear fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitWindow {
    pub low: f64,
    pub high: f64,
}

impl FitWindow {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Inclusive on both bounds. NaN is never inside a window.
    pub fn contains(self, x: f64) -> bool {
        self.low <= x && x <= self.high
    }
}

/// A fitted line `y = slope * x + intercept` with its uncertainty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
    /// 2x2 covariance of (slope, intercept), slope first.
    pub covariance: [[f64; 2]; 2],
    /// Number of samples inside the fit window.
    pub n_points: usize,
    pub window: FitWindow,
}

impl LineFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn slope_stderr(&self) -> f64 {
        self.covariance[0][0].sqrt()
    }

    pub fn intercept_stderr(&self) -> f64 {
        self.covariance[1][1].sqrt()
    }
}

/// A fitted line evaluated over a curve's x-domain, ready for overlay rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayLine {
    pub fit: LineFit,
    pub points: Vec<(f64, f64)>,
}

/// Bandgap estimate from the intersection of a baseline fit and an
/// absorption-edge fit on a Tauc-transformed curve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandgapEstimate {
    /// Intersection abscissa: the estimated gap energy (eV).
    pub energy_ev: f64,
    /// Tauc coordinate at the intersection.
    pub tauc_at_gap: f64,
    pub baseline: LineFit,
    pub edge: LineFit,
    /// Baseline line evaluated at every x sample of the input curve.
    pub baseline_line: Vec<(f64, f64)>,
    /// Edge line evaluated at every x sample of the input curve.
    pub edge_line: Vec<(f64, f64)>,
}

/// Intersection of the baseline and edge fits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GapPoint {
    pub energy_ev: f64,
    pub tauc_y: f64,
}

/// Per-curve Tauc analysis: whichever fits were requested, plus the gap
/// when both lines exist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaucAnalysis {
    pub label: String,
    pub baseline: Option<OverlayLine>,
    pub edge: Option<OverlayLine>,
    pub gap: Option<GapPoint>,
}

impl TaucAnalysis {
    /// Repackage a full bandgap estimate for rendering and export.
    pub fn from_bandgap(label: impl Into<String>, estimate: BandgapEstimate) -> Self {
        Self {
            label: label.into(),
            gap: Some(GapPoint {
                energy_ev: estimate.energy_ev,
                tauc_y: estimate.tauc_at_gap,
            }),
            baseline: Some(OverlayLine {
                fit: estimate.baseline,
                points: estimate.baseline_line,
            }),
            edge: Some(OverlayLine {
                fit: estimate.edge,
                points: estimate.edge_line,
            }),
        }
    }
}

/// A saved Tauc/bandgap analysis (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandgapFile {
    pub tool: String,
    pub transition: Transition,
    pub power: f64,
    pub curves: Vec<TaucAnalysis>,
}

/// One input spectrum: legend label plus the file it comes from.
#[derive(Debug, Clone)]
pub struct LabeledPath {
    pub label: String,
    pub path: PathBuf,
}

/// Output raster settings shared by every plotting subcommand.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub out: PathBuf,
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

/// `spectra ftir` run configuration.
#[derive(Debug, Clone)]
pub struct FtirConfig {
    pub inputs: Vec<LabeledPath>,
    /// Stacking offset between consecutive spectra, in percent of the
    /// previous curve's vertical range.
    pub percent: f64,
    pub plot: PlotOptions,
}

/// `spectra xrd` run configuration.
#[derive(Debug, Clone)]
pub struct XrdConfig {
    pub inputs: Vec<LabeledPath>,
    pub percent: f64,
    /// Reference diffraction peak files (d-spacing, relative intensity).
    pub reference: Vec<LabeledPath>,
    /// Radiation wavelength in Angstroms for Bragg conversion.
    pub wavelength: f64,
    pub plot: PlotOptions,
}

/// `spectra uvvis` run configuration.
#[derive(Debug, Clone)]
pub struct UvVisConfig {
    pub inputs: Vec<LabeledPath>,
    pub percent: f64,
    pub plot: PlotOptions,
}

/// `spectra tauc` run configuration.
#[derive(Debug, Clone)]
pub struct TaucConfig {
    pub inputs: Vec<LabeledPath>,
    pub transition: Transition,
    /// Tauc exponent actually applied (transition default or `--power` override).
    pub power: f64,
    pub baseline: Option<FitWindow>,
    pub edge: Option<FitWindow>,
    pub export_json: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
    pub plot: PlotOptions,
}

/// `spectra deriv` run configuration.
#[derive(Debug, Clone)]
pub struct DerivConfig {
    pub inputs: Vec<LabeledPath>,
    /// Moving-average window applied before differentiation (0 or 1 disables).
    pub smooth: usize,
    pub export_csv: Option<PathBuf>,
    pub plot: PlotOptions,
}
