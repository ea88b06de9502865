//! Counters collected while parsing.
//!
//! Diagnostics are purely informational. They never change which records are
//! produced; they exist so callers can tell a quiet export from a broken one
//! (a file whose lines never match the header grammar yields zero records
//! without any error).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Counters for one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseDiagnostics {
    /// Physical lines consumed, blank ones included
    pub lines_read: usize,
    /// Lines that were empty after normalization
    pub blank_lines: usize,
    /// Lines that matched the header pattern
    pub header_matches: usize,
    /// Records emitted
    pub records_emitted: usize,
    /// Assembled messages dropped by the denylist
    pub records_discarded: usize,
    /// Non-header lines with no pending message to attach to
    pub orphan_lines: usize,
}

impl ParseDiagnostics {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if parsing produced no records.
    ///
    /// This is a valid outcome, but usually means the input is not a chat
    /// export in the expected layout.
    pub fn is_zero_yield(&self) -> bool {
        self.records_emitted == 0
    }

    /// Percentage of finalized messages that the denylist dropped.
    pub fn discard_ratio(&self) -> f64 {
        let finalized = self.records_emitted + self.records_discarded;
        if finalized == 0 {
            return 0.0;
        }
        (self.records_discarded as f64 / finalized as f64) * 100.0
    }
}

impl fmt::Display for ParseDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} lines read, {} header lines matched, {} records emitted, {} discarded",
            self.lines_read, self.header_matches, self.records_emitted, self.records_discarded
        )
    }
}
