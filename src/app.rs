//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads instrument data files
//! - runs the transform/fit pipeline
//! - prints reports
//! - renders the PNG chart
//! - writes optional exports

use clap::Parser;

use crate::cli::{
    Cli, Command, DerivArgs, FtirArgs, GapsArgs, InputArgs, TaucArgs, UvVisArgs, XrdArgs,
};
use crate::domain::{
    BandgapFile, Curve, DerivConfig, FitWindow, FtirConfig, PlotOptions, TaucConfig, UvVisConfig,
    XrdConfig,
};
use crate::error::AppError;
use crate::io::ingest::pair_labels_with_paths;
use crate::plot::color::series_color;
use crate::plot::png::{render_png, AxisSpec, GapMarker, Overlay, PlotSpec, StemSeries};

pub mod pipeline;

/// Entry point for the `spectra` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Ftir(args) => handle_ftir(args),
        Command::Xrd(args) => handle_xrd(args),
        Command::UvVis(args) => handle_uvvis(args),
        Command::Tauc(args) => handle_tauc(args),
        Command::Deriv(args) => handle_deriv(args),
        Command::Gaps(args) => handle_gaps(args),
    }
}

fn handle_ftir(args: FtirArgs) -> Result<(), AppError> {
    let config = ftir_config_from_args(&args)?;
    let run = pipeline::run_ftir(&config)?;

    println!("{}", crate::report::format_dataset_summary("ftir", &run.raw));

    let spec = PlotSpec {
        axes: AxisSpec {
            x_label: "Wavenumber, cm⁻¹".to_string(),
            y_label: "Transmittance".to_string(),
            // Mid-IR convention: fixed window, high wavenumbers on the left.
            x_range: Some((400.0, 4000.0)),
            invert_x: true,
        },
        series: run.stacked,
        stems: Vec::new(),
        overlays: Vec::new(),
        markers: Vec::new(),
    };
    render_png(&spec, &config.plot, series_color)?;
    log::info!("wrote {}", config.plot.out.display());

    Ok(())
}

fn handle_xrd(args: XrdArgs) -> Result<(), AppError> {
    let config = xrd_config_from_args(&args)?;
    let run = pipeline::run_xrd(&config)?;

    println!("{}", crate::report::format_dataset_summary("xrd", &run.raw));

    let stems: Vec<StemSeries> = run
        .reference
        .iter()
        .map(|peaks| StemSeries {
            label: peaks.label.clone(),
            stems: peaks.x.iter().copied().zip(peaks.y.iter().copied()).collect(),
        })
        .collect();

    let spec = PlotSpec {
        axes: AxisSpec {
            x_label: "2θ, deg".to_string(),
            y_label: "Relative intensity".to_string(),
            x_range: Some((20.0, 140.0)),
            invert_x: false,
        },
        series: run.stacked,
        stems,
        overlays: Vec::new(),
        markers: Vec::new(),
    };
    render_png(&spec, &config.plot, series_color)?;
    log::info!("wrote {}", config.plot.out.display());

    Ok(())
}

fn handle_uvvis(args: UvVisArgs) -> Result<(), AppError> {
    let config = uvvis_config_from_args(&args)?;
    let run = pipeline::run_uvvis(&config)?;

    println!("{}", crate::report::format_dataset_summary("uvvis", &run.raw));

    // UV-Vis plots hug the measured wavelength span exactly.
    let x_range = data_x_span(&run.stacked);
    let spec = PlotSpec {
        axes: AxisSpec {
            x_label: "Wavelength, nm".to_string(),
            y_label: "Absorbance".to_string(),
            x_range,
            invert_x: false,
        },
        series: run.stacked,
        stems: Vec::new(),
        overlays: Vec::new(),
        markers: Vec::new(),
    };
    render_png(&spec, &config.plot, series_color)?;
    log::info!("wrote {}", config.plot.out.display());

    Ok(())
}

fn handle_tauc(args: TaucArgs) -> Result<(), AppError> {
    let config = tauc_config_from_args(&args)?;
    let run = pipeline::run_tauc(&config)?;

    // Print terminal output.
    println!(
        "{}",
        crate::report::format_dataset_summary("tauc", &run.transformed)
    );
    println!(
        "{}",
        crate::report::format_tauc_report(&run.analyses, config.transition, config.power)
    );

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::export::write_curves_csv(path, &run.transformed, "energy_ev", "tauc_y")?;
        log::info!("wrote {}", path.display());
    }
    if let Some(path) = &config.export_json {
        let file = BandgapFile {
            tool: "spectra".to_string(),
            transition: config.transition,
            power: config.power,
            curves: run.analyses.clone(),
        };
        crate::io::bandgap_file::write_bandgap_json(path, &file)?;
        log::info!("wrote {}", path.display());
    }

    let mut overlays = Vec::new();
    let mut markers = Vec::new();
    for (i, analysis) in run.analyses.iter().enumerate() {
        if let Some(line) = &analysis.baseline {
            overlays.push(Overlay {
                series_index: i,
                points: line.points.clone(),
            });
        }
        if let Some(line) = &analysis.edge {
            overlays.push(Overlay {
                series_index: i,
                points: line.points.clone(),
            });
        }
        if let Some(gap) = analysis.gap {
            markers.push(GapMarker {
                series_index: i,
                x: gap.energy_ev,
                y: gap.tauc_y,
            });
        }
    }

    let spec = PlotSpec {
        axes: AxisSpec {
            x_label: "Photon energy, eV".to_string(),
            y_label: tauc_y_label(config.power),
            x_range: None,
            invert_x: false,
        },
        series: run.transformed,
        stems: Vec::new(),
        overlays,
        markers,
    };
    render_png(&spec, &config.plot, series_color)?;
    log::info!("wrote {}", config.plot.out.display());

    Ok(())
}

fn handle_deriv(args: DerivArgs) -> Result<(), AppError> {
    let config = deriv_config_from_args(&args)?;
    let run = pipeline::run_deriv(&config)?;

    println!(
        "{}",
        crate::report::format_dataset_summary("deriv", &run.derivatives)
    );

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::export::write_curves_csv(path, &run.derivatives, "wavelength_nm", "da_dlambda")?;
        log::info!("wrote {}", path.display());
    }

    let spec = PlotSpec {
        axes: AxisSpec {
            x_label: "Wavelength, nm".to_string(),
            y_label: "dA/dλ".to_string(),
            x_range: None,
            invert_x: false,
        },
        series: run.derivatives,
        stems: Vec::new(),
        overlays: Vec::new(),
        markers: Vec::new(),
    };
    render_png(&spec, &config.plot, series_color)?;
    log::info!("wrote {}", config.plot.out.display());

    Ok(())
}

fn handle_gaps(args: GapsArgs) -> Result<(), AppError> {
    let file = crate::io::bandgap_file::read_bandgap_json(&args.json)?;

    println!(
        "{}",
        crate::report::format_tauc_report(&file.curves, file.transition, file.power)
    );
    Ok(())
}

pub fn ftir_config_from_args(args: &FtirArgs) -> Result<FtirConfig, AppError> {
    Ok(FtirConfig {
        inputs: pair_labels_with_paths(&args.input.raw, &args.input.labels)?,
        percent: args.percent,
        plot: plot_options_from_args(&args.input),
    })
}

pub fn xrd_config_from_args(args: &XrdArgs) -> Result<XrdConfig, AppError> {
    Ok(XrdConfig {
        inputs: pair_labels_with_paths(&args.input.raw, &args.input.labels)?,
        percent: args.percent,
        reference: pair_labels_with_paths(&args.reference, &args.ref_labels)?,
        wavelength: args.wavelength,
        plot: plot_options_from_args(&args.input),
    })
}

pub fn uvvis_config_from_args(args: &UvVisArgs) -> Result<UvVisConfig, AppError> {
    Ok(UvVisConfig {
        inputs: pair_labels_with_paths(&args.input.raw, &args.input.labels)?,
        percent: args.percent,
        plot: plot_options_from_args(&args.input),
    })
}

pub fn tauc_config_from_args(args: &TaucArgs) -> Result<TaucConfig, AppError> {
    Ok(TaucConfig {
        inputs: pair_labels_with_paths(&args.input.raw, &args.input.labels)?,
        transition: args.transition,
        power: args.power.unwrap_or_else(|| args.transition.power()),
        baseline: window_from_bounds(&args.baseline),
        edge: window_from_bounds(&args.edge),
        export_json: args.export_json.clone(),
        export_csv: args.export_csv.clone(),
        plot: plot_options_from_args(&args.input),
    })
}

pub fn deriv_config_from_args(args: &DerivArgs) -> Result<DerivConfig, AppError> {
    Ok(DerivConfig {
        inputs: pair_labels_with_paths(&args.input.raw, &args.input.labels)?,
        smooth: args.smooth,
        export_csv: args.export_csv.clone(),
        plot: plot_options_from_args(&args.input),
    })
}

fn plot_options_from_args(input: &InputArgs) -> PlotOptions {
    PlotOptions {
        out: input.out.clone(),
        width: input.width,
        height: input.height,
    }
}

/// Clap guarantees exactly two values when the flag is present.
fn window_from_bounds(bounds: &Option<Vec<f64>>) -> Option<FitWindow> {
    bounds.as_ref().map(|b| FitWindow::new(b[0], b[1]))
}

fn tauc_y_label(power: f64) -> String {
    if power == 2.0 {
        "(αhν)²".to_string()
    } else if power == 0.5 {
        "(αhν)^1/2".to_string()
    } else {
        format!("(αhν)^{power}")
    }
}

/// Exact finite x-span over every curve, or `None` when nothing is finite.
fn data_x_span(curves: &[Curve]) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for curve in curves {
        for &x in &curve.x {
            if x.is_finite() {
                lo = lo.min(x);
                hi = hi.max(x);
            }
        }
    }
    (hi > lo).then_some((lo, hi))
}
