//! Command-line parsing for the funnel comparison tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! comparison/math code: the CLI builds a `CompareConfig` and hands it to the
//! pipeline.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::{CompareConfig, DEFAULT_OUTPUT_DIR, ToleranceSpec};

/// Top-level CLI.
///
/// The tool computes the deviation of test data beyond the tolerance
/// envelope generated around reference data and writes `reference.csv`,
/// `test.csv`, `lowerBound.csv`, `upperBound.csv` and `errors.csv` into the
/// output directory. For each axis the envelope is sized by the maximum of
/// the three tolerance modes; unset tolerances are zero.
#[derive(Debug, Parser)]
#[command(
    name = "funnel",
    version,
    about = "Compare two (x, y) curves within a tolerance envelope"
)]
pub struct Cli {
    /// Path of two-column CSV file with reference data.
    #[arg(long, value_name = "PATH")]
    pub reference: PathBuf,

    /// Path of two-column CSV file with test data.
    #[arg(long, value_name = "PATH")]
    pub test: PathBuf,

    /// Directory to store output data.
    #[arg(long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Absolute tolerance along x axis.
    #[arg(long, default_value_t = 0.0)]
    pub atolx: f64,

    /// Absolute tolerance along y axis.
    #[arg(long, default_value_t = 0.0)]
    pub atoly: f64,

    /// Relative tolerance along x axis (relatively to the local value).
    #[arg(long, default_value_t = 0.0)]
    pub ltolx: f64,

    /// Relative tolerance along y axis (relatively to the local value).
    #[arg(long, default_value_t = 0.0)]
    pub ltoly: f64,

    /// Relative tolerance along x axis (relatively to the range).
    #[arg(long, default_value_t = 0.0)]
    pub rtolx: f64,

    /// Relative tolerance along y axis (relatively to the range).
    #[arg(long, default_value_t = 0.0)]
    pub rtoly: f64,
}

impl Cli {
    pub fn compare_config(&self) -> CompareConfig {
        CompareConfig {
            tolerances: ToleranceSpec {
                atolx: self.atolx,
                atoly: self.atoly,
                ltolx: self.ltolx,
                ltoly: self.ltoly,
                rtolx: self.rtolx,
                rtoly: self.rtoly,
            },
            output_dir: self.output.clone(),
        }
    }
}
