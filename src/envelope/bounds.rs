//! Funnel boundary construction.
//!
//! Every reference sample i spans a rectangle of half-width `hx[i]` and
//! half-height `hy[i]` centered on the sample. The lower (upper) boundary is
//! the polyline traced by the bottom (top) rectangle corners as the walk
//! follows the reference polyline:
//!
//! - on rising runs the lower boundary trails on the right corner, the upper
//!   on the left; falling runs mirror that choice
//! - a local extremum contributes both corners, incoming side first
//! - runs of equal slope contribute no interior corners
//!
//! Offsetting by `hx` can locally reverse the x ordering (tight peaks or
//! valleys); `simplify` repairs those loops afterwards so both boundaries
//! stay single-valued in x and usable by the interpolation primitive.
//!
//! Coordinates and half-widths are normalized by the absolute mean of each
//! axis before the walk and de-normalized after, keeping the fixed epsilon
//! comparisons meaningful across input magnitudes.

use crate::domain::{Curve, Envelope, HalfWidths};
use crate::math::approx_eq;

use super::Side;
use super::simplify::remove_backward_loops;

/// Slope magnitude standing in for a vertical reference segment.
const VERTICAL_SLOPE: f64 = 1e15;

/// Build the lower and upper boundary curves around `reference`.
///
/// `widths` must hold one half-width pair per reference sample. Degenerate
/// references (a single sample, runs of identical points) yield a zero-area
/// envelope segment rather than an error.
pub fn build_envelope(reference: &Curve, widths: &HalfWidths) -> Envelope {
    debug_assert_eq!(reference.len(), widths.x.len());
    debug_assert_eq!(reference.len(), widths.y.len());

    let norm = Normalized::new(reference, widths);
    let lower = norm.boundary(Side::Lower);
    let upper = norm.boundary(Side::Upper);

    Envelope {
        lower: norm.denormalize(lower),
        upper: norm.denormalize(upper),
    }
}

/// Reference data and half-widths scaled by the per-axis mean magnitude.
struct Normalized {
    x: Vec<f64>,
    y: Vec<f64>,
    hx: Vec<f64>,
    hy: Vec<f64>,
    mx: f64,
    my: f64,
}

impl Normalized {
    fn new(reference: &Curve, widths: &HalfWidths) -> Self {
        let mx = mean(reference.x()).abs();
        let my = mean(reference.y()).abs();
        Self {
            x: scale(reference.x(), mx),
            y: scale(reference.y(), my),
            hx: scale(&widths.x, mx),
            hy: scale(&widths.y, my),
            mx,
            my,
        }
    }

    fn denormalize(&self, (x, y): (Vec<f64>, Vec<f64>)) -> Curve {
        Curve::from_parts(unscale(x, self.mx), unscale(y, self.my))
    }

    /// Trace one boundary polyline (in normalized coordinates).
    fn boundary(&self, side: Side) -> (Vec<f64>, Vec<f64>) {
        let (x, y, hx, hy) = (&self.x, &self.y, &self.hx, &self.hy);
        let n = x.len();
        let t = side.y_sign();

        let mut bx: Vec<f64> = Vec::new();
        let mut by: Vec<f64> = Vec::new();

        // Skip identical samples at the front.
        let mut b = 0;
        while b + 1 < n && approx_eq(x[b], x[b + 1]) && approx_eq(y[b], y[b + 1]) {
            b += 1;
        }

        // Left corner of the first rectangle.
        bx.push(x[b] - hx[b]);
        by.push(y[b] + t * hy[b]);

        if b + 1 < n {
            let mut s0 = slope_sign(y[b + 1] - y[b]);
            let mut m0 = segment_slope(x[b], y[b], x[b + 1], y[b + 1], s0);

            // If the curve immediately moves away from this boundary's side,
            // the first rectangle also contributes its right corner.
            if leading_right_corner(side, s0) {
                bx.push(x[b] + hx[b]);
                by.push(y[b] + t * hy[b]);
            }

            for i in (b + 1)..(n - 1) {
                // Identical samples contribute nothing.
                if approx_eq(x[i], x[i + 1]) && approx_eq(y[i], y[i + 1]) {
                    continue;
                }

                let s1 = slope_sign(y[i + 1] - y[i]);
                let m1 = segment_slope(x[i], y[i], x[i + 1], y[i + 1], s1);

                if !approx_eq(m0, m1) {
                    for &d in corner_offsets(side, s0, s1) {
                        bx.push(x[i] + d * hx[i]);
                        by.push(y[i] + t * hy[i]);
                    }

                    // Drop corners that merely restate a flat tube segment.
                    let len = by.len();
                    let last_y = by[len - 1];
                    if approx_eq(y[i + 1] + t * hy[i + 1], last_y) {
                        if s0 * s1 == -1 && len >= 3 && approx_eq(by[len - 3], last_y) {
                            bx.truncate(len - 2);
                            by.truncate(len - 2);
                        } else if s0 * s1 != -1 && len >= 2 && approx_eq(by[len - 2], last_y) {
                            bx.truncate(len - 1);
                            by.truncate(len - 1);
                        }
                    }
                }

                s0 = s1;
                m0 = m1;
            }

            if trailing_left_corner(side, s0) {
                bx.push(x[n - 1] - hx[n - 1]);
                by.push(y[n - 1] + t * hy[n - 1]);
            }
        }

        // Right corner of the last rectangle.
        bx.push(x[n - 1] + hx[n - 1]);
        by.push(y[n - 1] + t * hy[n - 1]);

        remove_backward_loops(bx, by, side)
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn scale(values: &[f64], m: f64) -> Vec<f64> {
    if approx_eq(m, 0.0) {
        values.to_vec()
    } else {
        values.iter().map(|&v| v / m).collect()
    }
}

fn unscale(mut values: Vec<f64>, m: f64) -> Vec<f64> {
    if !approx_eq(m, 0.0) {
        for v in &mut values {
            *v *= m;
        }
    }
    values
}

fn slope_sign(dy: f64) -> i32 {
    if dy > 0.0 {
        1
    } else if dy < 0.0 {
        -1
    } else {
        0
    }
}

fn segment_slope(x0: f64, y0: f64, x1: f64, y1: f64, s: i32) -> f64 {
    if !approx_eq(x1, x0) {
        (y1 - y0) / (x1 - x0)
    } else if s > 0 {
        VERTICAL_SLOPE
    } else {
        -VERTICAL_SLOPE
    }
}

/// Does the first rectangle contribute its right corner too?
fn leading_right_corner(side: Side, s0: i32) -> bool {
    match side {
        Side::Lower => s0 == 1,
        Side::Upper => s0 == -1,
    }
}

/// Does the last rectangle contribute its left corner before the closing one?
fn trailing_left_corner(side: Side, s0: i32) -> bool {
    match side {
        Side::Lower => s0 == -1,
        Side::Upper => s0 == 1,
    }
}

/// X-offset directions (as signs on `hx`) contributed by an interior sample,
/// given the slope signs before (`s0`) and after (`s1`) it.
fn corner_offsets(side: Side, s0: i32, s1: i32) -> &'static [f64] {
    match side {
        Side::Lower => {
            if s0 != -1 && s1 != -1 {
                &[1.0]
            } else if s0 != 1 && s1 != 1 {
                &[-1.0]
            } else if s0 == -1 && s1 == 1 {
                // Valley: incoming left corner, outgoing right corner.
                &[-1.0, 1.0]
            } else {
                // Peak: incoming right corner, outgoing left corner.
                &[1.0, -1.0]
            }
        }
        Side::Upper => {
            if s0 != -1 && s1 != -1 {
                &[-1.0]
            } else if s0 != 1 && s1 != 1 {
                &[1.0]
            } else if s0 == 1 && s1 == -1 {
                // Peak: incoming left corner, outgoing right corner.
                &[-1.0, 1.0]
            } else {
                // Valley: incoming right corner, outgoing left corner.
                &[1.0, -1.0]
            }
        }
    }
}
