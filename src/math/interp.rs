//! Piecewise-linear curve sampling.
//!
//! A curve is evaluated between its two bracketing samples (by x):
//!
//! ```text
//!                    y1 - y0
//! y(x) = y0 + ----------------- * (x - x0)
//!                    x1 - x0
//! ```
//!
//! Numerical notes:
//! - Vertical segments (duplicate x) evaluate to the earlier sample's y; the
//!   zero-denominator guard keeps NaN out of the result.
//! - Outside the curve's x span, behavior is governed by [`Edges`]: funnel
//!   boundaries are conventionally extended flat from their end points, so
//!   the deviation stage samples with [`Edges::Clamp`] and an out-of-domain
//!   failure can never propagate out of the engine.

use crate::domain::Curve;
use crate::error::AppError;

/// Edge policy for sampling outside the curve's x span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edges {
    /// Fail with `OutOfDomain`.
    Strict,
    /// Extend flat using the first/last sample.
    Clamp,
}

/// Evaluate `curve` at abscissa `at`.
///
/// Requires the curve's x values to be non-decreasing, which holds for
/// reference curves (validated at ingest) and for envelope boundaries
/// (guaranteed by construction).
pub fn sample_at(curve: &Curve, at: f64, edges: Edges) -> Result<f64, AppError> {
    let x = curve.x();
    let y = curve.y();
    let n = x.len();

    if at < x[0] {
        return match edges {
            Edges::Clamp => Ok(y[0]),
            Edges::Strict => Err(AppError::out_of_domain(format!(
                "x={at} is below the curve domain [{}, {}].",
                x[0],
                x[n - 1]
            ))),
        };
    }
    if at > x[n - 1] {
        return match edges {
            Edges::Clamp => Ok(y[n - 1]),
            Edges::Strict => Err(AppError::out_of_domain(format!(
                "x={at} is above the curve domain [{}, {}].",
                x[0],
                x[n - 1]
            ))),
        };
    }

    if n == 1 {
        return Ok(y[0]);
    }

    // First index whose x is >= at; clamp to a valid segment end.
    let j = x.partition_point(|&v| v < at).clamp(1, n - 1);
    let (x0, y0) = (x[j - 1], y[j - 1]);
    let (x1, y1) = (x[j], y[j]);

    if (x1 - x0) * (at - x0) == 0.0 {
        return Ok(y0);
    }
    Ok(y0 + (y1 - y0) / (x1 - x0) * (at - x0))
}

/// Evaluate `curve` at every abscissa in `xs`.
pub fn sample_many(curve: &Curve, xs: &[f64], edges: Edges) -> Result<Vec<f64>, AppError> {
    xs.iter().map(|&at| sample_at(curve, at, edges)).collect()
}
