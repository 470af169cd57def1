//! Export transformed curves to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one row per sample, with the curve label repeated so several
//! curves can share one file.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::Curve;
use crate::error::{AppError, ErrorKind};

/// Write curves to a CSV file with columns `label,<x_name>,<y_name>`.
pub fn write_curves_csv(
    path: &Path,
    curves: &[Curve],
    x_name: &str,
    y_name: &str,
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            ErrorKind::Io,
            format!("failed to create export CSV '{}': {e}", path.display()),
        )
    })?;

    writeln!(file, "label,{x_name},{y_name}").map_err(|e| write_error(path, e))?;

    for curve in curves {
        for (&x, &y) in curve.x.iter().zip(&curve.y) {
            writeln!(file, "{},{x:.10},{y:.10}", csv_quote(&curve.label))
                .map_err(|e| write_error(path, e))?;
        }
    }

    Ok(())
}

fn write_error(path: &Path, e: std::io::Error) -> AppError {
    AppError::new(
        ErrorKind::Io,
        format!("failed to write export CSV '{}': {e}", path.display()),
    )
}

/// Labels are free text from the command line; quote the ones that would
/// break the row format.
fn csv_quote(label: &str) -> String {
    if label.contains(',') || label.contains('"') || label.contains('\n') {
        format!("\"{}\"", label.replace('"', "\"\""))
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_labels_pass_through() {
        assert_eq!(csv_quote("annealed 300C"), "annealed 300C");
    }

    #[test]
    fn commas_and_quotes_get_escaped() {
        assert_eq!(csv_quote("a,b"), "\"a,b\"");
        assert_eq!(csv_quote("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
