//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - used in-memory during comparison
//! - exported to CSV/JSON
//! - reloaded later to re-check persisted results
//!
//! Everything here is a value type: produced once by a pipeline stage and
//! never mutated afterwards.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Default output directory when the caller does not specify one.
pub const DEFAULT_OUTPUT_DIR: &str = "results";

/// An ordered sequence of `(x, y)` samples.
///
/// Invariants (enforced by [`Curve::from_xy`]):
/// - `x` and `y` have the same, non-zero length
/// - every value is finite
///
/// Reference curves must additionally be ordered by `x` (ties keep input
/// order); see [`Curve::ensure_ordered_by_x`]. Test curves carry no ordering
/// requirement.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Curve {
    /// Build a curve from parallel x/y buffers, validating the data-model
    /// invariants up front.
    pub fn from_xy(x: Vec<f64>, y: Vec<f64>, label: &str) -> Result<Self, AppError> {
        if x.len() != y.len() {
            return Err(AppError::invalid_input(format!(
                "{label} curve: x and y must have the same length ({} vs {}).",
                x.len(),
                y.len()
            )));
        }
        if x.is_empty() {
            return Err(AppError::invalid_input(format!(
                "{label} curve: at least one sample is required."
            )));
        }
        for (i, (&xv, &yv)) in x.iter().zip(&y).enumerate() {
            if !xv.is_finite() || !yv.is_finite() {
                return Err(AppError::invalid_input(format!(
                    "{label} curve: non-finite value at sample {i} (x={xv}, y={yv})."
                )));
            }
        }
        Ok(Self { x, y })
    }

    /// Construct a curve the engine itself computed.
    ///
    /// Callers must guarantee equal-length, finite buffers; this is not a
    /// public entry point.
    pub(crate) fn from_parts(x: Vec<f64>, y: Vec<f64>) -> Self {
        debug_assert_eq!(x.len(), y.len());
        debug_assert!(!x.is_empty());
        Self { x, y }
    }

    /// Fail with `InvalidInput` unless `x` is non-decreasing.
    pub fn ensure_ordered_by_x(&self, label: &str) -> Result<(), AppError> {
        for i in 1..self.x.len() {
            if self.x[i] < self.x[i - 1] {
                return Err(AppError::invalid_input(format!(
                    "{label} curve: x values must be ordered (x[{}]={} < x[{}]={}).",
                    i,
                    self.x[i],
                    i - 1,
                    self.x[i - 1]
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Iterate over `(x, y)` samples in input order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// `(min, max)` over the x axis.
    pub fn x_span(&self) -> (f64, f64) {
        span(&self.x)
    }

    /// `(min, max)` over the y axis.
    pub fn y_span(&self) -> (f64, f64) {
        span(&self.y)
    }
}

fn span(values: &[f64]) -> (f64, f64) {
    let mut min = values[0];
    let mut max = values[0];
    for &v in values {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    (min, max)
}

/// The six raw tolerance inputs, one half-width source per axis and mode.
///
/// - `atol*`: absolute half-width
/// - `ltol*`: relative to each reference sample's own value
/// - `rtol*`: relative to the full range of the reference axis
///
/// Absent inputs are zero. An all-zero axis is a legal degenerate (zero-width
/// funnel), not an error.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ToleranceSpec {
    pub atolx: f64,
    pub atoly: f64,
    pub ltolx: f64,
    pub ltoly: f64,
    pub rtolx: f64,
    pub rtoly: f64,
}

impl ToleranceSpec {
    /// Named entries, in the order the CLI documents them.
    pub fn entries(&self) -> [(&'static str, f64); 6] {
        [
            ("atolx", self.atolx),
            ("atoly", self.atoly),
            ("ltolx", self.ltolx),
            ("ltoly", self.ltoly),
            ("rtolx", self.rtolx),
            ("rtoly", self.rtoly),
        ]
    }

    /// Fail with `InvalidTolerance` on any negative or non-finite value.
    pub fn validate(&self) -> Result<(), AppError> {
        for (name, value) in self.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::invalid_tolerance(format!(
                    "Tolerance {name} must be a non-negative number, got {value}."
                )));
            }
        }
        Ok(())
    }
}

/// Resolved per-reference-point admissible half-widths.
#[derive(Debug, Clone, PartialEq)]
pub struct HalfWidths {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// The funnel boundary: two polylines, each single-valued in x, that enclose
/// the tolerance-widened region around the reference curve.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub lower: Curve,
    pub upper: Curve,
}

/// A test sample that fell outside the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Violation {
    pub x: f64,
    /// Positive excess beyond the nearer violated boundary.
    pub error: f64,
}

/// Per-test-point deviation outside the envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Deviations {
    /// One sample per test point: 0 inside the envelope, positive outside.
    pub errors: Curve,
    /// The subset of test points with a positive error.
    pub violations: Vec<Violation>,
}

impl Deviations {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Largest excess over all test points (0 when fully inside).
    pub fn max_error(&self) -> f64 {
        self.violations
            .iter()
            .fold(0.0_f64, |acc, v| acc.max(v.error))
    }
}

/// Caller-supplied configuration for one comparison run.
///
/// Passed explicitly at call time; the engine keeps no process-global state.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareConfig {
    pub tolerances: ToleranceSpec,
    pub output_dir: PathBuf,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            tolerances: ToleranceSpec::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// All computed outputs of a single comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRun {
    pub reference: Curve,
    pub test: Curve,
    pub envelope: Envelope,
    pub deviations: Deviations,
}

impl ComparisonRun {
    pub fn is_valid(&self) -> bool {
        self.deviations.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn from_xy_rejects_mismatched_lengths() {
        let err = Curve::from_xy(vec![0.0, 1.0], vec![0.0], "reference").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn from_xy_rejects_empty() {
        let err = Curve::from_xy(vec![], vec![], "test").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn from_xy_rejects_non_finite() {
        let err = Curve::from_xy(vec![0.0, f64::NAN], vec![1.0, 2.0], "test").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn ordered_check_allows_ties() {
        let curve = Curve::from_xy(vec![0.0, 1.0, 1.0, 2.0], vec![0.0; 4], "reference").unwrap();
        assert!(curve.ensure_ordered_by_x("reference").is_ok());
    }

    #[test]
    fn ordered_check_rejects_decreasing() {
        let curve = Curve::from_xy(vec![0.0, 2.0, 1.0], vec![0.0; 3], "reference").unwrap();
        let err = curve.ensure_ordered_by_x("reference").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn spans_cover_min_and_max() {
        let curve = Curve::from_xy(vec![2.0, 0.0, 5.0], vec![-1.0, 3.0, 0.5], "test").unwrap();
        assert_eq!(curve.x_span(), (0.0, 5.0));
        assert_eq!(curve.y_span(), (-1.0, 3.0));
    }

    #[test]
    fn tolerance_validate_rejects_negative() {
        let spec = ToleranceSpec {
            atoly: -0.1,
            ..ToleranceSpec::default()
        };
        let err = spec.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidTolerance);
    }

    #[test]
    fn tolerance_all_zero_is_legal() {
        assert!(ToleranceSpec::default().validate().is_ok());
    }

    #[test]
    fn max_error_over_violations() {
        let deviations = Deviations {
            errors: Curve::from_parts(vec![0.0, 1.0], vec![0.0, 0.3]),
            violations: vec![Violation { x: 1.0, error: 0.3 }],
        };
        assert!(!deviations.is_valid());
        assert!((deviations.max_error() - 0.3).abs() < 1e-15);
    }
}
