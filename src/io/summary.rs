//! Machine-readable run summary.
//!
//! `summary.json` sits next to the five CSV tables and captures the verdict
//! and the settings that produced it, so downstream tooling does not need to
//! re-derive them from the tables.

use std::fs::File;
use std::path::Path;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::domain::{ComparisonRun, CompareConfig, ToleranceSpec};
use crate::error::AppError;

pub const SUMMARY_FILE: &str = "summary.json";

/// The persisted summary schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub tool: String,
    pub generated_at: String,
    pub valid: bool,
    pub reference_points: usize,
    pub test_points: usize,
    pub lower_bound_points: usize,
    pub upper_bound_points: usize,
    pub violation_count: usize,
    pub max_error: f64,
    pub tolerances: ToleranceSpec,
}

impl RunSummary {
    pub fn from_run(run: &ComparisonRun, config: &CompareConfig) -> Self {
        Self {
            tool: "funnel".to_string(),
            generated_at: Local::now().to_rfc3339(),
            valid: run.is_valid(),
            reference_points: run.reference.len(),
            test_points: run.test.len(),
            lower_bound_points: run.envelope.lower.len(),
            upper_bound_points: run.envelope.upper.len(),
            violation_count: run.deviations.violations.len(),
            max_error: run.deviations.max_error(),
            tolerances: config.tolerances,
        }
    }
}

/// Write `summary.json` into `dir` (which must already exist).
pub fn write_summary_json(dir: &Path, run: &ComparisonRun, config: &CompareConfig) -> Result<(), AppError> {
    let path = dir.join(SUMMARY_FILE);
    let file = File::create(&path)
        .map_err(|e| AppError::io(format!("Failed to create '{}': {e}", path.display())))?;

    let summary = RunSummary::from_run(run, config);
    serde_json::to_writer_pretty(file, &summary)
        .map_err(|e| AppError::io(format!("Failed to write '{}': {e}", path.display())))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Curve;
    use crate::envelope::{build_envelope, resolve_half_widths};

    fn run_with_violation() -> ComparisonRun {
        let reference =
            Curve::from_xy(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 0.0], "reference").unwrap();
        let spec = ToleranceSpec {
            atoly: 0.1,
            ..ToleranceSpec::default()
        };
        let widths = resolve_half_widths(&reference, &spec).unwrap();
        let envelope = build_envelope(&reference, &widths);
        let test = Curve::from_xy(vec![0.0, 1.0, 2.0], vec![0.0, 1.3, 0.0], "test").unwrap();
        let deviations = crate::deviation::evaluate(&envelope, &test).unwrap();
        ComparisonRun {
            reference,
            test,
            envelope,
            deviations,
        }
    }

    #[test]
    fn summary_captures_verdict_and_counts() {
        let run = run_with_violation();
        let config = CompareConfig {
            tolerances: ToleranceSpec {
                atoly: 0.1,
                ..ToleranceSpec::default()
            },
            ..CompareConfig::default()
        };
        let summary = RunSummary::from_run(&run, &config);
        assert!(!summary.valid);
        assert_eq!(summary.reference_points, 3);
        assert_eq!(summary.violation_count, 1);
        assert!((summary.max_error - 0.2).abs() < 1e-9);
        assert_eq!(summary.tolerances.atoly, 0.1);
    }

    #[test]
    fn summary_json_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let run = run_with_violation();
        let config = CompareConfig::default();
        write_summary_json(dir.path(), &run, &config).unwrap();

        let content = std::fs::read_to_string(dir.path().join(SUMMARY_FILE)).unwrap();
        let parsed: RunSummary = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.tool, "funnel");
        assert_eq!(parsed.test_points, 3);
    }
}
