//! Resolve raw tolerance inputs into per-point admissible half-widths.
//!
//! The three tolerance modes express alternative acceptance criteria, so the
//! funnel at each point is as wide as the most permissive one:
//!
//! ```text
//! tol_a[i] = max(atol_a, ltol_a * |value_a[i]|, rtol_a * range_a)
//! ```
//!
//! `range_a` is computed once over the whole reference axis. A constant axis
//! has `range_a == 0`, so `rtol` alone yields a zero-width funnel there;
//! `atol`/`ltol` remain available as alternatives.

use crate::domain::{Curve, HalfWidths, ToleranceSpec};
use crate::error::AppError;

/// Compute the admissible half-width at every reference sample, per axis.
pub fn resolve_half_widths(
    reference: &Curve,
    spec: &ToleranceSpec,
) -> Result<HalfWidths, AppError> {
    spec.validate()?;

    let (x_min, x_max) = reference.x_span();
    let (y_min, y_max) = reference.y_span();
    let range_x = x_max - x_min;
    let range_y = y_max - y_min;

    let mut x = Vec::with_capacity(reference.len());
    let mut y = Vec::with_capacity(reference.len());
    for (xv, yv) in reference.points() {
        x.push(spec.atolx.max(spec.rtolx * range_x).max(spec.ltolx * xv.abs()));
        y.push(spec.atoly.max(spec.rtoly * range_y).max(spec.ltoly * yv.abs()));
    }

    Ok(HalfWidths { x, y })
}
