//! Output configuration shared by all writers.

use serde::{Deserialize, Serialize};

/// Controls how records are rendered by the output writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// CSV field delimiter (default: `;`)
    pub delimiter: u8,
    /// Write a CSV header row (default: true)
    pub include_header: bool,
    /// Pretty-print JSON arrays (default: true)
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            delimiter: b';',
            include_header: true,
            pretty: true,
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn without_header(mut self) -> Self {
        self.include_header = false;
        self
    }

    #[must_use]
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }
}
