//! Core types around the parser.
//!
//! This module contains:
//! - [`diagnostics`] - Counters returned with every parse
//! - [`models`] - Output configuration
//! - [`output`] - Format writers (CSV, JSON, JSONL)

pub mod diagnostics;
pub mod models;
pub mod output;

pub use diagnostics::ParseDiagnostics;
pub use models::OutputConfig;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
