//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the numeric/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{Curve, LineFit, TaucAnalysis, Transition};
use crate::math::extrema::{nan_max, nan_min};

/// Format the dataset summary printed after every plotting run.
pub fn format_dataset_summary(command: &str, curves: &[Curve]) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== spectra {command} ===\n"));
    out.push_str(&format!("Curves: {}\n", curves.len()));
    for curve in curves {
        out.push_str(&format!(
            "- {:<20} n={:<6} x=[{:.3}, {:.3}] y=[{:.4}, {:.4}]\n",
            truncate(&curve.label, 20),
            curve.len(),
            nan_min(curve.x.iter().copied()),
            nan_max(curve.x.iter().copied()),
            nan_min(curve.y.iter().copied()),
            nan_max(curve.y.iter().copied()),
        ));
    }

    out
}

/// Format the Tauc analysis report: fitted-line table plus gap estimates.
pub fn format_tauc_report(analyses: &[TaucAnalysis], transition: Transition, power: f64) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Transition: {} (exponent {power})\n",
        transition.display_name()
    ));

    let any_fit = analyses
        .iter()
        .any(|a| a.baseline.is_some() || a.edge.is_some());
    if !any_fit {
        out.push_str("No fit windows given; curves plotted without bandgap analysis.\n");
        return out;
    }

    out.push_str(&format!(
        "{:<20} {:<8} {:>12} {:>12} {:>14} {:>16} {:>4}\n",
        "curve", "line", "slope", "stderr", "intercept", "window", "n"
    ));
    out.push_str(&format!(
        "{:-<20} {:-<8} {:-<12} {:-<12} {:-<14} {:-<16} {:-<4}\n",
        "", "", "", "", "", "", ""
    ));
    for analysis in analyses {
        if let Some(line) = &analysis.baseline {
            out.push_str(&format_fit_row(&analysis.label, "baseline", &line.fit));
        }
        if let Some(line) = &analysis.edge {
            out.push_str(&format_fit_row(&analysis.label, "edge", &line.fit));
        }
    }

    for analysis in analyses {
        if let Some(gap) = analysis.gap {
            out.push_str(&format!(
                "Gap {}: {:.4} eV (Tauc y {:.4})\n",
                analysis.label, gap.energy_ev, gap.tauc_y
            ));
        }
    }

    out
}

fn format_fit_row(label: &str, which: &str, fit: &LineFit) -> String {
    format!(
        "{:<20} {:<8} {:>12.4} {:>12.4} {:>14.4} {:>16} {:>4}\n",
        truncate(label, 20),
        which,
        fit.slope,
        fit.slope_stderr(),
        fit.intercept,
        format!("[{:.2}, {:.2}]", fit.window.low, fit.window.high),
        fit.n_points
    )
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FitWindow, GapPoint, OverlayLine};

    fn fake_fit(slope: f64, intercept: f64) -> LineFit {
        LineFit {
            slope,
            intercept,
            covariance: [[0.01, 0.0], [0.0, 0.04]],
            n_points: 12,
            window: FitWindow::new(2.8, 3.1),
        }
    }

    #[test]
    fn dataset_summary_lists_every_curve() {
        let curves = vec![
            Curve::new("anatase", vec![1.0, 2.0, 3.0], vec![0.1, 0.5, 0.2]),
            Curve::new("rutile", vec![1.0, 2.0], vec![0.3, 0.4]),
        ];
        let text = format_dataset_summary("ftir", &curves);
        assert!(text.starts_with("=== spectra ftir ===\n"));
        assert!(text.contains("Curves: 2"));
        assert!(text.contains("anatase"));
        assert!(text.contains("n=3"));
        assert!(text.contains("x=[1.000, 2.000]"));
    }

    #[test]
    fn tauc_report_without_windows_says_so() {
        let analyses = vec![TaucAnalysis {
            label: "s1".to_string(),
            baseline: None,
            edge: None,
            gap: None,
        }];
        let text = format_tauc_report(&analyses, Transition::Indirect, 0.5);
        assert!(text.contains("indirect (exponent 0.5)"));
        assert!(text.contains("No fit windows given"));
    }

    #[test]
    fn tauc_report_prints_fit_rows_and_gap() {
        let analyses = vec![TaucAnalysis {
            label: "s1".to_string(),
            baseline: Some(OverlayLine {
                fit: fake_fit(0.1, 0.0),
                points: vec![],
            }),
            edge: Some(OverlayLine {
                fit: fake_fit(5.0, -14.8),
                points: vec![],
            }),
            gap: Some(GapPoint {
                energy_ev: 3.02,
                tauc_y: 0.302,
            }),
        }];
        let text = format_tauc_report(&analyses, Transition::Direct, 2.0);
        assert!(text.contains("baseline"));
        assert!(text.contains("edge"));
        assert!(text.contains("[2.80, 3.10]"));
        assert!(text.contains("Gap s1: 3.0200 eV"));
    }
}
