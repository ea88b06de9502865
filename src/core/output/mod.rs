//! Output format writers.
//!
//! This module provides writers for row-oriented output of parsed records:
//! - [`write_csv`] / [`to_csv`] - CSV, semicolon-delimited by default - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of records - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one record per line - requires `json-output` feature
//!
//! Every record is written with the same four fields in the same order:
//! `date`, `time`, `author`, `content`.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatsift::Result<()> {
//! use chatsift::core::output::{write_csv, write_jsonl, to_csv};
//! use chatsift::core::models::OutputConfig;
//! use chatsift::MessageRecord;
//!
//! let records = vec![
//!     MessageRecord::new("1/2/24", "10:00:00", "Alice", "Hello"),
//!     MessageRecord::new("1/2/24", "10:01:00", "Bob", "Hi"),
//! ];
//!
//! write_csv(&records, "data/processed/chat_history.csv", &OutputConfig::new())?;
//! write_jsonl(&records, "data/processed/chat_history.jsonl", &OutputConfig::new())?;
//!
//! let csv_string = to_csv(&records, &OutputConfig::new())?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv, write_csv_to};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl, write_jsonl_to};

use std::fs::{self, File};
use std::path::Path;

use crate::error::Result;

/// Column names, in output order.
pub const COLUMNS: [&str; 4] = ["date", "time", "author", "content"];

/// Creates `path`, creating missing parent directories first.
#[cfg_attr(
    not(any(feature = "csv-output", feature = "json-output")),
    allow(dead_code)
)]
pub(crate) fn create_output_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(File::create(path)?)
}
