//! Read/write bandgap analysis JSON files.
//!
//! Bandgap JSON is the "portable" representation of a Tauc analysis:
//! - transition convention and the exponent actually applied
//! - per-curve fit parameters with covariance
//! - gap estimates and the fitted lines evaluated on the curve's grid
//!
//! The schema is defined by `domain::BandgapFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::BandgapFile;
use crate::error::{AppError, ErrorKind};

/// Write a bandgap JSON file.
pub fn write_bandgap_json(path: &Path, analysis: &BandgapFile) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            ErrorKind::Io,
            format!(
                "failed to create bandgap JSON '{}': {e}",
                path.display()
            ),
        )
    })?;

    serde_json::to_writer_pretty(file, analysis).map_err(|e| {
        AppError::new(
            ErrorKind::Io,
            format!("failed to write bandgap JSON '{}': {e}", path.display()),
        )
    })?;

    Ok(())
}

/// Read a bandgap JSON file.
pub fn read_bandgap_json(path: &Path) -> Result<BandgapFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(
            ErrorKind::Io,
            format!("failed to open bandgap JSON '{}': {e}", path.display()),
        )
    })?;
    let analysis: BandgapFile = serde_json::from_reader(file).map_err(|e| {
        AppError::new(
            ErrorKind::FileFormat,
            format!("invalid bandgap JSON '{}': {e}", path.display()),
        )
    })?;
    Ok(analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GapPoint, TaucAnalysis, Transition};

    #[test]
    fn written_files_read_back_unchanged() {
        let original = BandgapFile {
            tool: "spectra".to_string(),
            transition: Transition::Direct,
            power: 2.0,
            curves: vec![TaucAnalysis {
                label: "anatase".to_string(),
                baseline: None,
                edge: None,
                gap: Some(GapPoint {
                    energy_ev: 3.21,
                    tauc_y: 0.0,
                }),
            }],
        };

        let mut path = std::env::temp_dir();
        path.push(format!("spectra-bandgap-{}.json", std::process::id()));

        write_bandgap_json(&path, &original).unwrap();
        let restored = read_bandgap_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(restored.tool, "spectra");
        assert_eq!(restored.transition, Transition::Direct);
        assert_eq!(restored.curves.len(), 1);
        let gap = restored.curves[0].gap.unwrap();
        assert!((gap.energy_ev - 3.21).abs() < 1e-12);
    }

    #[test]
    fn malformed_json_is_a_format_error() {
        let mut path = std::env::temp_dir();
        path.push(format!("spectra-bandgap-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();

        let err = read_bandgap_json(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert_eq!(err.kind(), ErrorKind::FileFormat);
    }
}
