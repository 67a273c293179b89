//! Input/output helpers.
//!
//! - two-column CSV ingest + validation (`ingest`)
//! - the five canonical result tables (`export`)
//! - machine-readable run summary JSON (`summary`)

pub mod export;
pub mod ingest;
pub mod summary;

pub use export::*;
pub use ingest::*;
pub use summary::*;
