//! PNG chart rendering with plotters.
//!
//! The renderer is data-driven: callers describe the finished chart as a
//! `PlotSpec` (curves already stacked/transformed, reference stems, fitted
//! overlay lines, gap markers) and this module only draws. All series and
//! bounds are computed before the render call, which keeps drawing free of
//! numeric policy and makes the data prep testable on its own.
//!
//! Chart elements:
//! - curves: solid lines, one legend entry each
//! - reference peaks: dashed vertical stems, one legend entry per file
//! - fitted lines: dashed, in the color of their source curve
//! - gap estimates: filled circles

use plotters::prelude::*;

use crate::domain::{Curve, PlotOptions};
use crate::error::{AppError, ErrorKind};
use crate::plot::color::ColorPolicy;

/// Axis configuration for one chart.
#[derive(Debug, Clone)]
pub struct AxisSpec {
    pub x_label: String,
    pub y_label: String,
    /// Fixed x-bounds (ascending). `None` spans the data padded by 5%.
    pub x_range: Option<(f64, f64)>,
    /// Render the x-axis with values decreasing left to right.
    pub invert_x: bool,
}

/// A fitted line drawn dashed in the color of its source curve.
#[derive(Debug, Clone)]
pub struct Overlay {
    pub series_index: usize,
    pub points: Vec<(f64, f64)>,
}

/// A point marker tied to a source curve.
#[derive(Debug, Clone, Copy)]
pub struct GapMarker {
    pub series_index: usize,
    pub x: f64,
    pub y: f64,
}

/// Dashed vertical stems sharing one legend entry.
#[derive(Debug, Clone)]
pub struct StemSeries {
    pub label: String,
    /// (x, top) pairs; each stem runs from the axis floor to `top`.
    pub stems: Vec<(f64, f64)>,
}

/// A complete, render-ready chart description.
#[derive(Debug, Clone)]
pub struct PlotSpec {
    pub axes: AxisSpec,
    pub series: Vec<Curve>,
    pub stems: Vec<StemSeries>,
    pub overlays: Vec<Overlay>,
    pub markers: Vec<GapMarker>,
}

/// Render the chart described by `spec` to `options.out` as a PNG.
///
/// `color_of` maps (series index, total series count) to a color; stems are
/// indexed after the curves.
pub fn render_png(
    spec: &PlotSpec,
    options: &PlotOptions,
    color_of: ColorPolicy,
) -> Result<(), AppError> {
    let (x_lo, x_hi) = x_bounds(spec);
    let (y_lo, y_hi) = y_bounds(spec);

    let root =
        BitMapBackend::new(&options.out, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_error)?;

    // A reversed range renders the axis with values decreasing rightward.
    let x_range = if spec.axes.invert_x {
        x_hi..x_lo
    } else {
        x_lo..x_hi
    };

    let mut chart = ChartBuilder::on(&root)
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(x_range, y_lo..y_hi)
        .map_err(draw_error)?;

    chart
        .configure_mesh()
        .x_desc(&spec.axes.x_label)
        .y_desc(&spec.axes.y_label)
        // Coarse grid only; the fine mesh drowns thin spectra.
        .light_line_style(&WHITE)
        .bold_line_style(&RGBColor(200, 200, 200))
        .label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(draw_error)?;

    let total = spec.series.len() + spec.stems.len();

    // 1) Curves.
    for (i, curve) in spec.series.iter().enumerate() {
        let color = color_of(i, total);
        let points = clip_x(
            curve.x.iter().copied().zip(curve.y.iter().copied()),
            x_lo,
            x_hi,
        );
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(1)))
            .map_err(draw_error)?
            .label(curve.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });
    }

    // 2) Reference stems. One legend entry per stem series.
    for (j, reference) in spec.stems.iter().enumerate() {
        let color = color_of(spec.series.len() + j, total);
        let mut labeled = false;
        for &(x, top) in &reference.stems {
            if !(x.is_finite() && top.is_finite()) || x < x_lo || x > x_hi {
                continue;
            }
            let stem = chart
                .draw_series(DashedLineSeries::new(
                    [(x, y_lo), (x, top)],
                    6,
                    4,
                    color.stroke_width(1),
                ))
                .map_err(draw_error)?;
            if !labeled {
                stem.label(reference.label.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
                });
                labeled = true;
            }
        }
    }

    // 3) Fitted overlay lines, clipped to the visible box so steep edge
    //    fits do not shoot past the axes.
    for overlay in &spec.overlays {
        let color = color_of(overlay.series_index, total);
        let points = clip_box(&overlay.points, x_lo, x_hi, y_lo, y_hi);
        chart
            .draw_series(DashedLineSeries::new(points, 8, 5, color.stroke_width(1)))
            .map_err(draw_error)?;
    }

    // 4) Gap markers on top.
    for marker in &spec.markers {
        let color = color_of(marker.series_index, total);
        chart
            .draw_series(std::iter::once(Circle::new(
                (marker.x, marker.y),
                4,
                color.filled(),
            )))
            .map_err(draw_error)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .label_font(("sans-serif", 15))
        .draw()
        .map_err(draw_error)?;

    root.present().map_err(draw_error)?;
    Ok(())
}

fn draw_error(e: impl std::fmt::Display) -> AppError {
    AppError::new(ErrorKind::Render, format!("chart rendering failed: {e}"))
}

/// X bounds: the fixed axis range when set, otherwise the finite data span
/// padded by 5%.
fn x_bounds(spec: &PlotSpec) -> (f64, f64) {
    if let Some((lo, hi)) = spec.axes.x_range {
        return (lo, hi);
    }
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for curve in &spec.series {
        for &x in &curve.x {
            if x.is_finite() {
                lo = lo.min(x);
                hi = hi.max(x);
            }
        }
    }
    for reference in &spec.stems {
        for &(x, _) in &reference.stems {
            if x.is_finite() {
                lo = lo.min(x);
                hi = hi.max(x);
            }
        }
    }
    for marker in &spec.markers {
        if marker.x.is_finite() {
            lo = lo.min(marker.x);
            hi = hi.max(marker.x);
        }
    }
    if !(lo.is_finite() && hi.is_finite()) {
        return (0.0, 1.0);
    }
    pad_range(lo, hi, 0.05)
}

/// Y bounds from the finite values of curves, stem tops, and markers,
/// padded by 5%. Overlay lines are excluded: they are clipped to the data
/// box, not allowed to stretch it.
fn y_bounds(spec: &PlotSpec) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for curve in &spec.series {
        for &y in &curve.y {
            if y.is_finite() {
                lo = lo.min(y);
                hi = hi.max(y);
            }
        }
    }
    for reference in &spec.stems {
        for &(_, top) in &reference.stems {
            if top.is_finite() {
                lo = lo.min(top);
                hi = hi.max(top);
            }
        }
    }
    for marker in &spec.markers {
        if marker.y.is_finite() {
            lo = lo.min(marker.y);
            hi = hi.max(marker.y);
        }
    }
    if !(lo.is_finite() && hi.is_finite()) {
        return (0.0, 1.0);
    }
    pad_range(lo, hi, 0.05)
}

fn pad_range(lo: f64, hi: f64, frac: f64) -> (f64, f64) {
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * frac
    } else {
        lo.abs().max(1.0) * frac
    };
    (lo - pad, hi + pad)
}

/// Keep points whose x lies inside the axis bounds. Non-finite coordinates
/// are dropped.
fn clip_x<I: IntoIterator<Item = (f64, f64)>>(points: I, x_lo: f64, x_hi: f64) -> Vec<(f64, f64)> {
    points
        .into_iter()
        .filter(|&(x, y)| x >= x_lo && x <= x_hi && y.is_finite())
        .collect()
}

/// Keep points inside the visible box on both axes.
fn clip_box(points: &[(f64, f64)], x_lo: f64, x_hi: f64, y_lo: f64, y_hi: f64) -> Vec<(f64, f64)> {
    points
        .iter()
        .copied()
        .filter(|&(x, y)| x >= x_lo && x <= x_hi && y >= y_lo && y <= y_hi)
        .collect()
}
