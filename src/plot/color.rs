//! Curve color assignment.
//!
//! The index→color mapping is an explicit policy passed into the renderer
//! rather than a library default cycle, so a caller can swap palettes
//! without touching drawing code.

use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

/// Maps (series index, total series count) to a color.
pub type ColorPolicy = fn(usize, usize) -> RGBColor;

/// Color for series `index` out of `total`: hues spaced evenly around the
/// wheel at fixed saturation/lightness.
pub fn series_color(index: usize, total: usize) -> RGBColor {
    let total = total.max(1);
    let hue = (index as f32 / total as f32) * 360.0;
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    RGBColor(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colors using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<RGBColor> {
    (0..n).map(|i| series_color(i, n)).collect()
}
