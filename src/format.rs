//! Choosing how extracted records are written.
//!
//! ```rust
//! # #[cfg(feature = "csv-output")]
//! # fn example() -> chatsift::Result<()> {
//! use chatsift::MessageRecord;
//! use chatsift::core::models::OutputConfig;
//! use chatsift::format::{OutputFormat, to_format_string};
//!
//! let records = [MessageRecord::new("1/2/24", "10:00:00", "Alice", "Hello!")];
//! let format = OutputFormat::from_path("chat_history.csv")?;
//! let text = to_format_string(&records, format, &OutputConfig::new())?;
//! assert!(text.starts_with("date;time;author;content"));
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::Path;

use crate::MessageRecord;
use crate::core::models::OutputConfig;
use crate::error::{ChatsiftError, Result};

/// Serialization used for the record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Delimited table, one row per record
    Csv,
    /// A single array of record objects
    Json,
    /// One record object per line
    Jsonl,
}

impl OutputFormat {
    /// File extension written for this format, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Picks the format matching an output file's extension.
    ///
    /// Matching ignores case, and `.ndjson` counts as JSON Lines.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(ChatsiftError::invalid_format(
                "output",
                format!(
                    "cannot tell the record format of {} from its extension (use .csv, .json or .jsonl)",
                    path.display()
                ),
            )),
        }
    }

    /// Cargo feature that provides the writer.
    fn feature(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv-output",
            OutputFormat::Json | OutputFormat::Jsonl => "json-output",
        }
    }

    fn disabled(self) -> ChatsiftError {
        ChatsiftError::invalid_format(
            "output",
            format!("{self} records need chatsift built with the '{}' feature", self.feature()),
        )
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Csv => "CSV",
            OutputFormat::Json => "JSON",
            OutputFormat::Jsonl => "JSONL",
        })
    }
}

/// Writes records to `path` in `format`, creating missing parent directories.
///
/// # Errors
///
/// Fails if the file cannot be written, or if the writer for `format` was
/// compiled out.
#[allow(unused_variables)]
pub fn write_to_format(
    records: &[MessageRecord],
    path: impl AsRef<Path>,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(records, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(records, path, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(records, path, config),
        #[allow(unreachable_patterns)]
        _ => Err(format.disabled()),
    }
}

/// Renders records in `format` without touching the filesystem.
#[allow(unused_variables)]
pub fn to_format_string(
    records: &[MessageRecord],
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::to_csv(records, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::to_json(records, config),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::to_jsonl(records, config),
        #[allow(unreachable_patterns)]
        _ => Err(format.disabled()),
    }
}
