//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - immutable sampled curves (`Curve`)
//! - tolerance inputs and resolved half-widths (`ToleranceSpec`, `HalfWidths`)
//! - envelope and deviation outputs (`Envelope`, `Deviations`, `Violation`)
//! - run configuration and the full comparison result (`CompareConfig`,
//!   `ComparisonRun`)

pub mod types;

pub use types::*;
