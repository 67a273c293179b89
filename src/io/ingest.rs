//! Two-column CSV ingest.
//!
//! Input files carry one `(x, y)` sample per row, delimited by comma or
//! semicolon, with an optional single header row. Design goals:
//!
//! - **Strict shape**: every row must have exactly two columns (clear errors
//!   with line numbers, exit code 2)
//! - **Lenient dialect**: delimiter is sniffed from the first line, a header
//!   row is tolerated but not required
//! - **No hidden repair**: a non-numeric data row is an error, not a skip

use std::fs;
use std::path::Path;

use crate::domain::Curve;
use crate::error::AppError;

/// Read a two-column CSV file into a curve labeled `label` ("reference" or
/// "test") for error messages.
pub fn read_curve_csv(path: &Path, label: &str) -> Result<Curve, AppError> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read {label} CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(sniff_delimiter(&content))
        .from_reader(content.as_bytes());

    let mut x = Vec::new();
    let mut y = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let line = idx + 1;
        let record = result.map_err(|e| {
            AppError::invalid_input(format!(
                "{label} CSV '{}': parse error at line {line}: {e}",
                path.display()
            ))
        })?;

        // Blank lines are skipped by the reader; anything else must be (x, y).
        if record.len() != 2 {
            return Err(AppError::invalid_input(format!(
                "{label} CSV '{}': line {line} has {} columns, expected 2.",
                path.display(),
                record.len()
            )));
        }

        match (parse_value(&record[0]), parse_value(&record[1])) {
            (Some(xv), Some(yv)) => {
                x.push(xv);
                y.push(yv);
            }
            _ if idx == 0 => {
                // Header row.
                continue;
            }
            _ => {
                return Err(AppError::invalid_input(format!(
                    "{label} CSV '{}': line {line} is not numeric: '{}', '{}'.",
                    path.display(),
                    &record[0],
                    &record[1]
                )));
            }
        }
    }

    log::debug!("ingest: {} samples from '{}'", x.len(), path.display());

    Curve::from_xy(x, y, label)
}

/// Pick the delimiter from the first line: semicolon only when the file uses
/// semicolons and no commas.
fn sniff_delimiter(content: &str) -> u8 {
    let first_line = content.lines().next().unwrap_or("");
    if first_line.contains(';') && !first_line.contains(',') {
        b';'
    } else {
        b','
    }
}

fn parse_value(field: &str) -> Option<f64> {
    let v = field.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}
