//! The five canonical result tables.
//!
//! Each comparison writes `reference.csv`, `test.csv`, `lowerBound.csv`,
//! `upperBound.csv` and `errors.csv` into the output directory, two columns
//! `x,y`, one row per sample. Reference and test are emitted at their input
//! resolution; the bounds at the envelope's own resolution; errors at the
//! test resolution.
//!
//! Values are written with Rust's shortest-round-trip float formatting, so
//! re-reading a table reproduces the in-memory samples exactly.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::{ComparisonRun, Curve};
use crate::error::AppError;

pub const REFERENCE_FILE: &str = "reference.csv";
pub const TEST_FILE: &str = "test.csv";
pub const LOWER_BOUND_FILE: &str = "lowerBound.csv";
pub const UPPER_BOUND_FILE: &str = "upperBound.csv";
pub const ERRORS_FILE: &str = "errors.csv";

/// Write all five result tables into `dir`, creating it if needed.
pub fn write_result_tables(dir: &Path, run: &ComparisonRun) -> Result<(), AppError> {
    fs::create_dir_all(dir)
        .map_err(|e| AppError::io(format!("Failed to create output directory '{}': {e}", dir.display())))?;

    write_curve_csv(&dir.join(REFERENCE_FILE), &run.reference)?;
    write_curve_csv(&dir.join(TEST_FILE), &run.test)?;
    write_curve_csv(&dir.join(LOWER_BOUND_FILE), &run.envelope.lower)?;
    write_curve_csv(&dir.join(UPPER_BOUND_FILE), &run.envelope.upper)?;
    write_curve_csv(&dir.join(ERRORS_FILE), &run.deviations.errors)?;

    log::debug!("export: wrote result tables to '{}'", dir.display());

    Ok(())
}

/// Write one curve as a two-column CSV with an `x,y` header.
pub fn write_curve_csv(path: &Path, curve: &Curve) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "x,y")
        .map_err(|e| AppError::io(format!("Failed to write '{}': {e}", path.display())))?;
    for (x, y) in curve.points() {
        writeln!(out, "{x},{y}")
            .map_err(|e| AppError::io(format!("Failed to write '{}': {e}", path.display())))?;
    }
    out.flush()
        .map_err(|e| AppError::io(format!("Failed to write '{}': {e}", path.display())))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::read_curve_csv;

    #[test]
    fn written_tables_round_trip_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curve.csv");
        // Values chosen to exercise shortest-round-trip formatting.
        let curve = Curve::from_xy(
            vec![0.0, 0.1, 1.0 / 3.0, 2.5e-17],
            vec![-1.0, 0.30000000000000004, 1e300, -0.0],
            "test",
        )
        .unwrap();
        // Output rows are unordered on x here; ingest does not reorder.
        write_curve_csv(&path, &curve).unwrap();
        let back = read_curve_csv(&path, "test").unwrap();
        assert_eq!(back.x(), curve.x());
        assert_eq!(back.y(), curve.y());
    }

    #[test]
    fn unwritable_directory_is_an_io_error() {
        let curve = Curve::from_xy(vec![0.0], vec![0.0], "test").unwrap();
        let err = write_curve_csv(Path::new("/no/such/dir/curve.csv"), &curve).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Io);
    }
}
