//! Deviation evaluation: how far does the test curve leave the envelope?
//!
//! Each test sample is checked against the lower and upper boundary
//! interpolated at its x. Boundaries are closed: a sample exactly on a
//! boundary has error 0. Samples beyond the widened reference span are
//! checked against the flat boundary extension, so leading/trailing test
//! data always gets a defined error.

use crate::domain::{Curve, Deviations, Envelope, Violation};
use crate::error::AppError;
use crate::math::interp::{Edges, sample_at};

/// Compute the per-test-point error curve against `envelope`.
///
/// The error is 0 inside the envelope and the positive y-excess beyond the
/// nearer violated boundary outside. The result has one sample per test
/// sample, at the test curve's x positions.
pub fn evaluate(envelope: &Envelope, test: &Curve) -> Result<Deviations, AppError> {
    let mut errors = Vec::with_capacity(test.len());
    let mut violations = Vec::new();

    for (x, y) in test.points() {
        let lower = sample_at(&envelope.lower, x, Edges::Clamp)?;
        let upper = sample_at(&envelope.upper, x, Edges::Clamp)?;

        let error = if y < lower {
            lower - y
        } else if y > upper {
            y - upper
        } else {
            0.0
        };

        if error > 0.0 {
            violations.push(Violation { x, error });
        }
        errors.push(error);
    }

    log::debug!(
        "deviation: {} test points, {} outside the envelope",
        test.len(),
        violations.len()
    );

    Ok(Deviations {
        errors: Curve::from_parts(test.x().to_vec(), errors),
        violations,
    })
}
