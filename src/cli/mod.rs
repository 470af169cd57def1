//! Command-line parsing for the spectroscopy plotting toolkit.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the numeric/plotting code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::Transition;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "spectra",
    version,
    about = "Spectroscopy plotting toolkit (FTIR / XRD / UV-Vis)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plot stacked FTIR transmittance spectra (two-column instrument export).
    Ftir(FtirArgs),
    /// Plot stacked XRD patterns, optionally with reference peak stems.
    Xrd(XrdArgs),
    /// Plot stacked UV-Vis absorbance spectra.
    #[command(name = "uvvis")]
    UvVis(UvVisArgs),
    /// Tauc-transform UV-Vis spectra and estimate optical bandgaps.
    Tauc(TaucArgs),
    /// Plot the numerical derivative of UV-Vis spectra.
    Deriv(DerivArgs),
    /// Print the fit table from a previously exported bandgap JSON.
    Gaps(GapsArgs),
}

/// Input selection and output raster options shared by every subcommand.
#[derive(Debug, Parser, Clone)]
pub struct InputArgs {
    /// Raw spectrum files, one per curve.
    #[arg(long, visible_alias = "specs", num_args = 1.., required = true, value_name = "FILE")]
    pub raw: Vec<PathBuf>,

    /// Legend labels, one per file (defaults to file stems).
    #[arg(long, num_args = 1.., value_name = "LABEL")]
    pub labels: Vec<String>,

    /// Output PNG path.
    #[arg(long, value_name = "PNG")]
    pub out: PathBuf,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 1024)]
    pub width: u32,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 768)]
    pub height: u32,
}

/// `spectra ftir` options.
#[derive(Debug, Parser, Clone)]
pub struct FtirArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Stacking offset between consecutive spectra, in percent of the
    /// previous curve's vertical range.
    #[arg(long, default_value_t = 10.0)]
    pub percent: f64,
}

/// `spectra xrd` options.
#[derive(Debug, Parser, Clone)]
pub struct XrdArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Stacking offset between consecutive patterns, in percent of the
    /// previous curve's vertical range.
    #[arg(long, default_value_t = 10.0)]
    pub percent: f64,

    /// Reference diffraction peak files (d-spacing in Angstroms, relative
    /// intensity).
    #[arg(long, num_args = 1.., value_name = "FILE")]
    pub reference: Vec<PathBuf>,

    /// Legend labels for the reference files (defaults to file stems).
    #[arg(long = "ref-labels", num_args = 1.., value_name = "LABEL")]
    pub ref_labels: Vec<String>,

    /// Radiation wavelength in Angstroms for the Bragg conversion.
    #[arg(long, default_value_t = 1.5406)]
    pub wavelength: f64,
}

/// `spectra uvvis` options.
#[derive(Debug, Parser, Clone)]
pub struct UvVisArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Stacking offset between consecutive spectra, in percent of the
    /// previous curve's vertical range.
    #[arg(long, default_value_t = 20.0)]
    pub percent: f64,
}

/// `spectra tauc` options.
#[derive(Debug, Parser, Clone)]
pub struct TaucArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Transition convention selecting the Tauc exponent.
    #[arg(long, value_enum, default_value_t = Transition::Direct)]
    pub transition: Transition,

    /// Override the Tauc exponent implied by --transition.
    #[arg(long)]
    pub power: Option<f64>,

    /// Baseline fit window as two photon energies (eV).
    #[arg(long, num_args = 2, value_names = ["LO", "HI"])]
    pub baseline: Option<Vec<f64>>,

    /// Absorption-edge fit window as two photon energies (eV).
    #[arg(long, num_args = 2, value_names = ["LO", "HI"])]
    pub edge: Option<Vec<f64>>,

    /// Export the bandgap analysis as JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,

    /// Export the transformed Tauc curves as CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,
}

/// `spectra deriv` options.
#[derive(Debug, Parser, Clone)]
pub struct DerivArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Moving-average window (samples) applied before differentiation;
    /// 0 or 1 disables smoothing.
    #[arg(long, default_value_t = 0)]
    pub smooth: usize,

    /// Export the derivative curves as CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,
}

/// `spectra gaps` options.
#[derive(Debug, Parser, Clone)]
pub struct GapsArgs {
    /// Bandgap JSON file produced by `spectra tauc --export-json`.
    #[arg(long, value_name = "JSON")]
    pub json: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn specs_alias_parses_like_raw() {
        let cli = Cli::try_parse_from([
            "spectra", "ftir", "--specs", "a.txt", "b.txt", "--out", "o.png",
        ])
        .unwrap();
        match cli.command {
            Command::Ftir(args) => {
                assert_eq!(args.input.raw.len(), 2);
                assert!(args.input.labels.is_empty());
                assert_eq!(args.percent, 10.0);
            }
            other => panic!("parsed wrong subcommand: {other:?}"),
        }
    }

    #[test]
    fn gaps_takes_a_json_path() {
        let cli = Cli::try_parse_from(["spectra", "gaps", "--json", "gaps.json"]).unwrap();
        match cli.command {
            Command::Gaps(args) => assert_eq!(args.json, PathBuf::from("gaps.json")),
            other => panic!("parsed wrong subcommand: {other:?}"),
        }
    }

    #[test]
    fn tauc_windows_take_two_values() {
        let cli = Cli::try_parse_from([
            "spectra", "tauc", "--raw", "a.txt", "--out", "o.png", "--baseline", "1.5", "2.0",
            "--edge", "3.0", "3.4",
        ])
        .unwrap();
        match cli.command {
            Command::Tauc(args) => {
                assert_eq!(args.baseline, Some(vec![1.5, 2.0]));
                assert_eq!(args.edge, Some(vec![3.0, 3.4]));
                assert_eq!(args.transition, Transition::Direct);
                assert!(args.power.is_none());
            }
            other => panic!("parsed wrong subcommand: {other:?}"),
        }
    }
}
