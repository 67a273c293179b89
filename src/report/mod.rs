//! Reporting: human-readable summaries and the failure-diagnostic log.
//!
//! Formatting code lives in one place so the math stays clean and output
//! changes are localized.

pub mod format;

pub use format::*;

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::Local;

use crate::error::AppError;

/// Name of the diagnostic log written next to the result tables on failure.
pub const LOG_FILE: &str = "funnel.log";

/// Write the failure diagnostic into `dir`, best effort.
///
/// Callers surface the error itself through the exit code; this side channel
/// exists so that wrappers which only see the status code can recover the
/// message. A failure to write the log must not mask the original error, so
/// it is only warned about.
pub fn write_failure_log(dir: &Path, err: &AppError) {
    if let Err(log_err) = try_write_failure_log(dir, err) {
        log::warn!("could not write {LOG_FILE}: {log_err}");
    }
}

fn try_write_failure_log(dir: &Path, err: &AppError) -> std::io::Result<()> {
    fs::create_dir_all(dir)?;
    let mut file = File::create(dir.join(LOG_FILE))?;
    writeln!(file, "funnel comparison failed at {}", Local::now().to_rfc3339())?;
    writeln!(file, "exit code: {}", err.exit_code())?;
    writeln!(file, "error: {err}")?;
    Ok(())
}
