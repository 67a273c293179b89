//! Boundary re-parameterization: remove backward-ordered loops.
//!
//! Offsetting rectangle corners by the x half-width can locally reverse the
//! x ordering of a boundary polyline (a "loop"), which would make it
//! unusable for interpolation by x. For each backward segment `(j, j+1)`,
//! this pass finds the enclosing segments `(i-1, i)` and `(k-1, k)` that
//! intersect, deletes the looped points between them, and inserts the
//! intersection point, leaving the polyline single-valued in x.
//!
//! The search walks candidate `k` forward while re-locating the matching `i`
//! by interpolating the pre-loop branch at `x[k]`; whether a candidate
//! overshoots depends on which boundary is being repaired (`Side`), since the
//! lower boundary must keep the lower of two overlapping branches and the
//! upper boundary the upper one.

use crate::math::approx_eq;

use super::Side;

/// Repair backward-ordered runs in a boundary polyline.
///
/// `x`/`y` hold the corner points as emitted by the boundary walk. Returns
/// the repaired polyline with `x` non-decreasing.
pub(crate) fn remove_backward_loops(
    mut x: Vec<f64>,
    mut y: Vec<f64>,
    side: Side,
) -> (Vec<f64>, Vec<f64>) {
    let keep_lower = side == Side::Lower;

    let mut j = 1usize;
    while j + 2 < x.len() {
        if x[j + 1] < x[j] {
            let n = x.len();

            // Start of the pre-loop branch: smallest i with x[i-1] <= x[j+1].
            let mut i = j;
            let mut i_previous = i;
            while i > 1 && x[j + 1] < x[i - 1] {
                i -= 1;
            }

            // Last candidate for k: first index at or past x[j].
            let mut k_max = j + 1;
            while k_max + 1 < n && x[k_max] < x[j] {
                k_max += 1;
            }

            // Walk k forward until the post-loop branch crosses the pre-loop
            // branch; `level` tracks the pre-loop branch interpolated at x[k].
            let mut k = j + 1;
            let mut level = y[i - 1];
            while crosses(keep_lower, level, y[k]) && k < k_max {
                i_previous = i;
                k += 1;
                while i < j
                    && i + 1 < n
                    && (x[i] < x[k]
                        || (approx_eq(x[i], x[k])
                            && overlap_prefers_advance(keep_lower, &x, &y, i, k)))
                {
                    i += 1;
                }
                level = if !approx_eq(x[i], x[i - 1]) {
                    (y[i] - y[i - 1]) / (x[i] - x[i - 1]) * (x[k] - x[i - 1]) + y[i - 1]
                } else {
                    y[i]
                };
            }

            // k located: the intersection lies on segment (k-1, k). Re-locate
            // i on the polygonal line up to i_previous.
            i = if i_previous > 1 { i_previous - 1 } else { i_previous };
            let vertical_k = approx_eq(x[k], x[k - 1]);
            if !vertical_k {
                level = (y[k] - y[k - 1]) / (x[k] - x[k - 1]) * (x[i] - x[k - 1]) + y[k - 1];
            }
            while i + 1 < x.len()
                && ((!vertical_k && crosses(keep_lower, y[i], level))
                    || (vertical_k && x[i] < x[k]))
            {
                i += 1;
                if !vertical_k {
                    level = (y[k] - y[k - 1]) / (x[k] - x[k - 1]) * (x[i] - x[k - 1]) + y[k - 1];
                }
            }

            let intersection = segment_intersection(&x, &y, i, k);

            // Delete the looped points i..k, then splice in the intersection
            // unless it is already present.
            x.drain(i..k);
            y.drain(i..k);
            if let Some((ix, iy)) = intersection {
                if !approx_eq(x[i], ix) || !approx_eq(y[i], iy) {
                    x.insert(i, ix);
                    y.insert(i, iy);
                }
            }
            j = i;

            // The splice may have left a doubled point.
            if approx_eq(x[i - 1], x[i]) && approx_eq(y[i - 1], y[i]) {
                x.remove(i);
                y.remove(i);
                j = i - 1;
            }
        }
        j += 1;
    }

    (x, y)
}

/// Has the post-loop branch at `candidate` not yet crossed the pre-loop
/// branch `level`? (The crossing direction depends on the boundary side.)
fn crosses(keep_lower: bool, level: f64, candidate: f64) -> bool {
    if keep_lower {
        level < candidate
    } else {
        candidate < level
    }
}

/// Tie-break when both branches share an x: advance the pre-loop index only
/// if its point is strictly on the discarded side of the candidate, unless
/// the candidate itself continues vertically toward the discarded side.
fn overlap_prefers_advance(keep_lower: bool, x: &[f64], y: &[f64], i: usize, k: usize) -> bool {
    let vertical_continuation = k + 1 < x.len() && approx_eq(x[k], x[k + 1]);
    if keep_lower {
        y[i] < y[k] && !(vertical_continuation && y[k + 1] < y[k])
    } else {
        y[i] > y[k] && !(vertical_continuation && y[k + 1] > y[k])
    }
}

/// Intersection of segments `(i-1, i)` and `(k-1, k)`.
///
/// Returns `None` for parallel or doubly-vertical pairs, in which case no
/// point is spliced in.
fn segment_intersection(x: &[f64], y: &[f64], i: usize, k: usize) -> Option<(f64, f64)> {
    let i_vertical = approx_eq(x[i], x[i - 1]);
    let k_vertical = approx_eq(x[k], x[k - 1]);

    if i_vertical && k_vertical {
        return None;
    }
    if i_vertical {
        let iy = y[k - 1] + (x[i] - x[k - 1]) * (y[k] - y[k - 1]) / (x[k] - x[k - 1]);
        return Some((x[i], iy));
    }
    if k_vertical {
        let iy = y[i - 1] + (x[k] - x[i - 1]) * (y[i] - y[i - 1]) / (x[i] - x[i - 1]);
        return Some((x[k], iy));
    }

    let a1 = (y[i] - y[i - 1]) / (x[i] - x[i - 1]);
    let a2 = (y[k] - y[k - 1]) / (x[k] - x[k - 1]);
    if approx_eq(a1, a2) {
        return None;
    }
    let ix = (a1 * x[i - 1] - a2 * x[k - 1] - y[i - 1] + y[k - 1]) / (a1 - a2);
    let iy = if a1.abs() > a2.abs() {
        a2 * (ix - x[k - 1]) + y[k - 1]
    } else {
        a1 * (ix - x[i - 1]) + y[i - 1]
    };
    Some((ix, iy))
}
