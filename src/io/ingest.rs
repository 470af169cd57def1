//! Text-file ingest for instrument exports.
//!
//! This module turns raw instrument text files into clean `Curve`s that are
//! safe to transform and fit.
//!
//! Design goals:
//! - **Per-format parsers** matching each instrument's actual export
//!   (clear errors with line numbers + exit code 2)
//! - **Deterministic behavior** (no guessing beyond the documented
//!   header-row rules)
//! - **Separation of concerns**: no stacking/fitting logic here
//!
//! Format rules:
//! - FTIR (Bruker Vertex 70): whitespace/tab-delimited two-column, no header.
//! - XRD (Difrey-401): whitespace-delimited two-column, exactly one header
//!   row skipped; intensities are divided by their own maximum after load.
//! - UV-Vis: tab-delimited, two or more columns (extras ignored), an
//!   optional header row is auto-detected and skipped.
//! - Diffraction reference peaks: whitespace-delimited (d-spacing Å,
//!   relative intensity), converted to 2θ via Bragg's law; rows out of the
//!   arcsine domain are dropped.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{Curve, LabeledPath};
use crate::error::{AppError, ErrorKind};
use crate::math::bragg::two_theta_deg;
use crate::math::normalize::max_normalize;

/// Zip labels and paths into the inputs of a run.
///
/// An empty label list falls back to file stems; a non-empty list must match
/// the path count exactly.
pub fn pair_labels_with_paths(
    paths: &[PathBuf],
    labels: &[String],
) -> Result<Vec<LabeledPath>, AppError> {
    if !labels.is_empty() && labels.len() != paths.len() {
        return Err(AppError::new(
            ErrorKind::LabelPathMismatch,
            format!(
                "{} label(s) given for {} input file(s); counts must match",
                labels.len(),
                paths.len()
            ),
        ));
    }

    Ok(paths
        .iter()
        .enumerate()
        .map(|(i, path)| LabeledPath {
            label: labels
                .get(i)
                .cloned()
                .unwrap_or_else(|| file_stem_label(path)),
            path: path.clone(),
        })
        .collect())
}

/// Load an FTIR spectrum: two columns (wavenumber, transmittance), no header.
pub fn load_ftir(input: &LabeledPath) -> Result<Curve, AppError> {
    let text = read_input(&input.path)?;
    let (x, y) = parse_two_column(&text, 0).map_err(|e| format_error(&input.path, e))?;

    log::info!(
        "loaded {} FTIR samples from {}",
        x.len(),
        input.path.display()
    );
    Ok(Curve::new(input.label.clone(), x, y))
}

/// Load an XRD pattern: one header row, then two columns (2θ, intensity).
///
/// Intensities are scaled to a relative scale by their own maximum.
pub fn load_xrd(input: &LabeledPath) -> Result<Curve, AppError> {
    let text = read_input(&input.path)?;
    let (x, y) = parse_two_column(&text, 1).map_err(|e| format_error(&input.path, e))?;
    let y = max_normalize(&y);

    log::info!(
        "loaded {} XRD samples from {}",
        x.len(),
        input.path.display()
    );
    Ok(Curve::new(input.label.clone(), x, y))
}

/// Load a UV-Vis spectrum: tab-delimited (wavelength, absorbance, ...).
///
/// Columns beyond the second are ignored. If the first row does not parse as
/// numbers it is treated as a header and skipped.
pub fn load_uvvis(input: &LabeledPath) -> Result<Curve, AppError> {
    let text = read_input(&input.path)?;
    let (x, y, skipped_header) =
        parse_tab_table(&text).map_err(|e| format_error(&input.path, e))?;
    if skipped_header {
        log::debug!("skipped header row in {}", input.path.display());
    }

    log::info!(
        "loaded {} UV-Vis samples from {}",
        x.len(),
        input.path.display()
    );
    Ok(Curve::new(input.label.clone(), x, y))
}

/// Load reference diffraction peaks: two columns (d-spacing Å, intensity).
///
/// Each d-spacing is converted to a 2θ angle via Bragg's law for the given
/// radiation wavelength (Å). Spacings too small to diffract at that
/// wavelength are dropped.
pub fn load_reference_peaks(input: &LabeledPath, wavelength: f64) -> Result<Curve, AppError> {
    let text = read_input(&input.path)?;
    let (d_spacing, intensity) =
        parse_two_column(&text, 0).map_err(|e| format_error(&input.path, e))?;

    let mut two_theta = Vec::with_capacity(d_spacing.len());
    let mut kept_intensity = Vec::with_capacity(intensity.len());
    let mut dropped = 0usize;
    for (&d, &i) in d_spacing.iter().zip(&intensity) {
        let angle = two_theta_deg(d, wavelength);
        if angle.is_nan() {
            dropped += 1;
            continue;
        }
        two_theta.push(angle);
        kept_intensity.push(i);
    }

    if dropped > 0 {
        log::debug!(
            "dropped {dropped} reference peak(s) from {} (d-spacing below λ/2 for λ = {wavelength} Å)",
            input.path.display()
        );
    }
    if two_theta.is_empty() {
        return Err(AppError::new(
            ErrorKind::FileFormat,
            format!(
                "{}: no reference peaks diffract at λ = {wavelength} Å",
                input.path.display()
            ),
        ));
    }

    log::info!(
        "loaded {} reference peaks from {}",
        two_theta.len(),
        input.path.display()
    );
    Ok(Curve::new(input.label.clone(), two_theta, kept_intensity))
}

fn read_input(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|e| {
        AppError::new(
            ErrorKind::Io,
            format!("failed to read '{}': {e}", path.display()),
        )
    })
}

fn format_error(path: &Path, message: String) -> AppError {
    AppError::new(
        ErrorKind::FileFormat,
        format!("{}: {message}", path.display()),
    )
}

fn file_stem_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse whitespace-delimited two-column text.
///
/// Each non-blank row after `skip_rows` must hold exactly two numbers.
/// Line numbers in errors are 1-based over the whole file.
fn parse_two_column(text: &str, skip_rows: usize) -> Result<(Vec<f64>, Vec<f64>), String> {
    let mut x = Vec::new();
    let mut y = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if idx < skip_rows {
            continue;
        }
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(format!(
                "line {line_no}: expected 2 columns, found {}",
                fields.len()
            ));
        }
        x.push(parse_field(fields[0], line_no)?);
        y.push(parse_field(fields[1], line_no)?);
    }

    if x.is_empty() {
        return Err("no data rows".to_string());
    }
    Ok((x, y))
}

/// Parse tab-delimited text with at least two columns, extras ignored.
///
/// Returns the first two columns plus whether a header row was skipped. Only
/// the very first row may fail numeric parsing (that is the header); any
/// later bad row is an error.
fn parse_tab_table(text: &str) -> Result<(Vec<f64>, Vec<f64>, bool), String> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut skipped_header = false;

    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| format!("record {}: {e}", idx + 1))?;
        let line_no = record
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 1);
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }
        if record.len() < 2 {
            return Err(format!(
                "line {line_no}: expected at least 2 columns, found {}",
                record.len()
            ));
        }

        let parsed = record[0]
            .parse::<f64>()
            .and_then(|xv| record[1].parse::<f64>().map(|yv| (xv, yv)));
        match parsed {
            Ok((xv, yv)) => {
                x.push(xv);
                y.push(yv);
            }
            Err(_) if x.is_empty() && !skipped_header => {
                skipped_header = true;
            }
            Err(_) => {
                return Err(format!(
                    "line {line_no}: non-numeric value in '{}'\t'{}'",
                    &record[0], &record[1]
                ));
            }
        }
    }

    if x.is_empty() {
        return Err("no data rows".to_string());
    }
    Ok((x, y, skipped_header))
}

fn parse_field(field: &str, line_no: usize) -> Result<f64, String> {
    field
        .parse::<f64>()
        .map_err(|_| format!("line {line_no}: non-numeric value '{field}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_column_parses_tabs_and_spaces() {
        let text = "400.0\t0.91\n402.0  0.93\n";
        let (x, y) = parse_two_column(text, 0).unwrap();
        assert_eq!(x, vec![400.0, 402.0]);
        assert_eq!(y, vec![0.91, 0.93]);
    }

    #[test]
    fn two_column_skips_requested_header_rows() {
        let text = "angle intensity\n20.0 150\n20.05 148\n";
        let (x, y) = parse_two_column(text, 1).unwrap();
        assert_eq!(x, vec![20.0, 20.05]);
        assert_eq!(y, vec![150.0, 148.0]);
    }

    #[test]
    fn two_column_rejects_extra_columns_with_line_number() {
        let text = "1.0 2.0\n3.0 4.0 5.0\n";
        let err = parse_two_column(text, 0).unwrap_err();
        assert!(err.contains("line 2"), "{err}");
        assert!(err.contains("expected 2 columns"), "{err}");
    }

    #[test]
    fn two_column_rejects_text_values() {
        let text = "1.0 2.0\nbad 4.0\n";
        let err = parse_two_column(text, 0).unwrap_err();
        assert!(err.contains("line 2"), "{err}");
        assert!(err.contains("'bad'"), "{err}");
    }

    #[test]
    fn two_column_empty_file_is_an_error() {
        assert!(parse_two_column("", 0).is_err());
        // A lone header row with nothing under it is just as empty.
        assert!(parse_two_column("angle intensity\n", 1).is_err());
    }

    #[test]
    fn tab_table_reads_plain_data() {
        let text = "200.0\t0.05\n201.0\t0.06\n";
        let (x, y, skipped) = parse_tab_table(text).unwrap();
        assert_eq!(x, vec![200.0, 201.0]);
        assert_eq!(y, vec![0.05, 0.06]);
        assert!(!skipped);
    }

    #[test]
    fn tab_table_detects_and_skips_a_header() {
        let text = "wavelength\tabsorbance\n200.0\t0.05\n201.0\t0.06\n";
        let (x, y, skipped) = parse_tab_table(text).unwrap();
        assert_eq!(x, vec![200.0, 201.0]);
        assert_eq!(y, vec![0.05, 0.06]);
        assert!(skipped);
    }

    #[test]
    fn tab_table_ignores_extra_columns() {
        let text = "200.0\t0.05\t99\tnote\n201.0\t0.06\t98\tnote\n";
        let (x, y, _) = parse_tab_table(text).unwrap();
        assert_eq!(x, vec![200.0, 201.0]);
        assert_eq!(y, vec![0.05, 0.06]);
    }

    #[test]
    fn tab_table_rejects_bad_rows_after_the_first() {
        let text = "200.0\t0.05\noops\t0.06\n";
        let err = parse_tab_table(text).unwrap_err();
        assert!(err.contains("line 2"), "{err}");
    }

    #[test]
    fn tab_table_header_only_is_an_error() {
        assert!(parse_tab_table("wavelength\tabsorbance\n").is_err());
    }

    #[test]
    fn labels_default_to_file_stems() {
        let paths = vec![PathBuf::from("data/sample_a.txt"), PathBuf::from("b.dat")];
        let inputs = pair_labels_with_paths(&paths, &[]).unwrap();
        assert_eq!(inputs[0].label, "sample_a");
        assert_eq!(inputs[1].label, "b");
    }

    #[test]
    fn label_count_mismatch_is_rejected() {
        let paths = vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")];
        let labels = vec!["only one".to_string()];
        let err = pair_labels_with_paths(&paths, &labels).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LabelPathMismatch);
    }

    #[test]
    fn matching_labels_are_used_verbatim() {
        let paths = vec![PathBuf::from("a.txt")];
        let labels = vec!["annealed 300C".to_string()];
        let inputs = pair_labels_with_paths(&paths, &labels).unwrap();
        assert_eq!(inputs[0].label, "annealed 300C");
    }
}
