//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - reads the two input CSV files
//! - runs the comparison pipeline and persists the result tables
//! - prints the run summary

use clap::Parser;

use crate::cli::Cli;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `funnel` binary.
pub fn run() -> Result<(), AppError> {
    env_logger::init();

    let cli = Cli::parse();

    let reference = crate::io::ingest::read_curve_csv(&cli.reference, "reference")?;
    let test = crate::io::ingest::read_curve_csv(&cli.test, "test")?;

    let config = cli.compare_config();
    let run = pipeline::execute(reference, test, &config)?;

    println!("{}", crate::report::format_run_summary(&run, &config));

    Ok(())
}
