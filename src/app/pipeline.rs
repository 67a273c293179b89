//! Shared comparison pipeline used by the CLI and by library callers.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> resolve tolerances -> build envelope -> evaluate deviations ->
//! persist tables.
//!
//! The CLI can then focus on presentation (ingest + printing).

use crate::deviation;
use crate::domain::{CompareConfig, ComparisonRun, Curve, ToleranceSpec};
use crate::envelope;
use crate::error::AppError;
use crate::io;
use crate::report;

/// Run the pure comparison: no filesystem access, no partial output.
///
/// Validation failures (unordered reference, negative tolerance) surface
/// before any computation.
pub fn run_compare(
    reference: Curve,
    test: Curve,
    tolerances: &ToleranceSpec,
) -> Result<ComparisonRun, AppError> {
    reference.ensure_ordered_by_x("reference")?;

    let widths = envelope::resolve_half_widths(&reference, tolerances)?;
    let envelope = envelope::build_envelope(&reference, &widths);
    let deviations = deviation::evaluate(&envelope, &test)?;

    log::debug!(
        "compare: reference n={}, test n={}, valid={}",
        reference.len(),
        test.len(),
        deviations.is_valid()
    );

    Ok(ComparisonRun {
        reference,
        test,
        envelope,
        deviations,
    })
}

/// Run the comparison and persist the result tables plus `summary.json`.
///
/// On any failure the diagnostic log is written into the output directory so
/// wrappers that only observe the status code can recover the message.
pub fn execute(
    reference: Curve,
    test: Curve,
    config: &CompareConfig,
) -> Result<ComparisonRun, AppError> {
    let result = run_compare(reference, test, &config.tolerances).and_then(|run| {
        io::export::write_result_tables(&config.output_dir, &run)?;
        io::summary::write_summary_json(&config.output_dir, &run, config)?;
        Ok(run)
    });

    match result {
        Ok(run) => Ok(run),
        Err(err) => {
            report::write_failure_log(&config.output_dir, &err);
            Err(err)
        }
    }
}

/// Stable entry point mirroring the historical comparison boundary: flat
/// x/y buffers in, five tables plus a status out.
///
/// The returned error's `exit_code()` is the status contract for callers
/// that shell out or wrap this crate.
pub fn compare_and_report(
    x_reference: &[f64],
    y_reference: &[f64],
    x_test: &[f64],
    y_test: &[f64],
    config: &CompareConfig,
) -> Result<ComparisonRun, AppError> {
    let curves = Curve::from_xy(x_reference.to_vec(), y_reference.to_vec(), "reference")
        .and_then(|reference| {
            let test = Curve::from_xy(x_test.to_vec(), y_test.to_vec(), "test")?;
            Ok((reference, test))
        });

    match curves {
        Ok((reference, test)) => execute(reference, test, config),
        Err(err) => {
            report::write_failure_log(&config.output_dir, &err);
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::io::export::{
        ERRORS_FILE, LOWER_BOUND_FILE, REFERENCE_FILE, TEST_FILE, UPPER_BOUND_FILE,
    };
    use crate::io::ingest::read_curve_csv;
    use crate::math::interp::{Edges, sample_at};
    use std::path::PathBuf;

    const TRAPEZOID_X: [f64; 6] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    const TRAPEZOID_Y: [f64; 6] = [0.0, 0.0, 1.0, 1.0, 0.0, 0.0];

    fn config_in(dir: &tempfile::TempDir, tolerances: ToleranceSpec) -> CompareConfig {
        CompareConfig {
            tolerances,
            output_dir: dir.path().join("results"),
        }
    }

    #[test]
    fn identity_comparison_writes_all_tables_and_zero_errors() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(
            &dir,
            ToleranceSpec {
                atolx: 0.002,
                atoly: 0.002,
                ..ToleranceSpec::default()
            },
        );
        let run = compare_and_report(&TRAPEZOID_X, &TRAPEZOID_Y, &TRAPEZOID_X, &TRAPEZOID_Y, &config)
            .unwrap();

        assert!(run.is_valid());
        for file in [
            REFERENCE_FILE,
            TEST_FILE,
            LOWER_BOUND_FILE,
            UPPER_BOUND_FILE,
            ERRORS_FILE,
            crate::io::summary::SUMMARY_FILE,
        ] {
            assert!(config.output_dir.join(file).is_file(), "missing {file}");
        }

        let errors = read_curve_csv(&config.output_dir.join(ERRORS_FILE), "test").unwrap();
        assert!(errors.y().iter().all(|&e| e == 0.0));
    }

    #[test]
    fn persisted_bounds_reproduce_persisted_errors_exactly() {
        // Round-trip: re-running the deviation evaluation against the
        // re-read bounds must reproduce errors.csv bit for bit.
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(
            &dir,
            ToleranceSpec {
                atoly: 0.05,
                ..ToleranceSpec::default()
            },
        );
        let test_y = [0.0, 0.0, 1.1, 1.0, -0.2, 0.0];
        let run = compare_and_report(&TRAPEZOID_X, &TRAPEZOID_Y, &TRAPEZOID_X, &test_y, &config)
            .unwrap();
        assert!(!run.is_valid());

        let out = &config.output_dir;
        let lower = read_curve_csv(&out.join(LOWER_BOUND_FILE), "reference").unwrap();
        let upper = read_curve_csv(&out.join(UPPER_BOUND_FILE), "reference").unwrap();
        let test = read_curve_csv(&out.join(TEST_FILE), "test").unwrap();
        let persisted = read_curve_csv(&out.join(ERRORS_FILE), "test").unwrap();

        let envelope = crate::domain::Envelope { lower, upper };
        let recomputed = crate::deviation::evaluate(&envelope, &test).unwrap();
        assert_eq!(recomputed.errors.x(), persisted.x());
        assert_eq!(recomputed.errors.y(), persisted.y());
    }

    #[test]
    fn negative_tolerance_fails_before_writing_tables() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(
            &dir,
            ToleranceSpec {
                atoly: -0.05,
                ..ToleranceSpec::default()
            },
        );
        let err =
            compare_and_report(&TRAPEZOID_X, &TRAPEZOID_Y, &TRAPEZOID_X, &TRAPEZOID_Y, &config)
                .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidTolerance);
        assert_eq!(err.exit_code(), 3);
        assert!(!config.output_dir.join(REFERENCE_FILE).exists());
        assert!(config.output_dir.join(crate::report::LOG_FILE).is_file());
    }

    #[test]
    fn mismatched_buffers_fail_with_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir, ToleranceSpec::default());
        let err = compare_and_report(&TRAPEZOID_X, &TRAPEZOID_Y[..5], &TRAPEZOID_X, &TRAPEZOID_Y, &config)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(config.output_dir.join(crate::report::LOG_FILE).is_file());
    }

    #[test]
    fn unordered_reference_is_rejected() {
        let err = run_compare(
            Curve::from_xy(vec![0.0, 2.0, 1.0], vec![0.0; 3], "reference").unwrap(),
            Curve::from_xy(vec![0.0], vec![0.0], "test").unwrap(),
            &ToleranceSpec::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn atol_matches_equivalent_range_relative_tolerance() {
        // Reference y range is 1.0, so atoly=T and rtoly=T give the same
        // envelope.
        let reference = || {
            Curve::from_xy(TRAPEZOID_X.to_vec(), TRAPEZOID_Y.to_vec(), "reference").unwrap()
        };
        let test = || Curve::from_xy(TRAPEZOID_X.to_vec(), TRAPEZOID_Y.to_vec(), "test").unwrap();

        let by_atol = run_compare(
            reference(),
            test(),
            &ToleranceSpec {
                atoly: 0.05,
                ..ToleranceSpec::default()
            },
        )
        .unwrap();
        let by_rtol = run_compare(
            reference(),
            test(),
            &ToleranceSpec {
                rtoly: 0.05,
                ..ToleranceSpec::default()
            },
        )
        .unwrap();

        assert_eq!(by_atol.envelope, by_rtol.envelope);
    }

    #[test]
    fn reference_always_inside_own_envelope() {
        let run = run_compare(
            Curve::from_xy(TRAPEZOID_X.to_vec(), TRAPEZOID_Y.to_vec(), "reference").unwrap(),
            Curve::from_xy(TRAPEZOID_X.to_vec(), TRAPEZOID_Y.to_vec(), "test").unwrap(),
            &ToleranceSpec {
                ltoly: 0.1,
                rtolx: 0.01,
                ..ToleranceSpec::default()
            },
        )
        .unwrap();
        for (x, y) in run.reference.points() {
            let lo = sample_at(&run.envelope.lower, x, Edges::Clamp).unwrap();
            let hi = sample_at(&run.envelope.upper, x, Edges::Clamp).unwrap();
            assert!(lo <= y + 1e-12 && y <= hi + 1e-12);
        }
    }

    #[test]
    fn default_config_targets_results_dir() {
        assert_eq!(CompareConfig::default().output_dir, PathBuf::from("results"));
    }
}
