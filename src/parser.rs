//! The chat log parser.
//!
//! [`ChatLogParser`] turns the lines of a chat export into an ordered list of
//! [`MessageRecord`]s plus [`ParseDiagnostics`]. It is a single forward pass
//! with one pending buffer:
//!
//! 1. each line has invisible direction marks removed and is trimmed;
//! 2. blank lines are skipped;
//! 3. a line matching `<date>, <time> - <author>: <body>` finalizes the
//!    pending message and opens a new one;
//! 4. any other line is appended to the pending message, or dropped if no
//!    header has been seen yet;
//! 5. finalizing joins the body lines with single spaces and drops the
//!    message if the result contains a denylisted placeholder phrase.
//!
//! Parsing never fails. Input that matches nothing yields zero records,
//! which callers should check for via
//! [`ParseDiagnostics::is_zero_yield`].
//!
//! # Example
//!
//! ```rust
//! use chatsift::parser::ChatLogParser;
//!
//! let export = "\
//! 1/2/24, 10:00:00 - Alice: Hello
//! world
//! 2/2/24, 11:00:00 - Bob: Hi
//! 2/2/24, 11:00:05 - Bob: <Media omitted>";
//!
//! let outcome = ChatLogParser::new().parse_str(export);
//!
//! assert_eq!(outcome.records.len(), 2);
//! assert_eq!(outcome.records[0].content, "Hello world");
//! assert_eq!(outcome.records[1].author, "Bob");
//! assert_eq!(outcome.diagnostics.header_matches, 3);
//! assert_eq!(outcome.diagnostics.records_discarded, 1);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::MessageRecord;
use crate::config::ParserConfig;
use crate::core::diagnostics::ParseDiagnostics;
use crate::error::Result;
use crate::parsing::Assembler;
use crate::source::{SourceText, read_source, split_lines};

/// Result of one parse: records in source order plus counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOutcome {
    /// Emitted records, in the order their header lines appeared
    pub records: Vec<MessageRecord>,
    /// Informational counters
    pub diagnostics: ParseDiagnostics,
}

impl ParseOutcome {
    /// Returns `true` if no records were emitted.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of emitted records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Drops the diagnostics and returns the records.
    pub fn into_records(self) -> Vec<MessageRecord> {
        self.records
    }
}

/// Parser for WhatsApp-style text exports.
///
/// Holds only configuration. Each call to a `parse_*` method starts from a
/// clean state, so one parser can be shared freely (it is `Send + Sync`).
#[derive(Debug, Clone, Default)]
pub struct ChatLogParser {
    config: ParserConfig,
}

impl ChatLogParser {
    /// Creates a parser with the default denylist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses a sequence of physical lines.
    pub fn parse_lines<I>(&self, lines: I) -> ParseOutcome
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut assembler = Assembler::new(self.config.denylist());
        let mut records = Vec::new();

        for line in lines {
            if let Some(record) = assembler.push_line(line.as_ref()) {
                records.push(record);
            }
        }
        if let Some(record) = assembler.finish() {
            records.push(record);
        }

        let diagnostics = assembler.into_diagnostics();
        debug!(
            lines_read = diagnostics.lines_read,
            header_matches = diagnostics.header_matches,
            records_emitted = diagnostics.records_emitted,
            records_discarded = diagnostics.records_discarded,
            orphan_lines = diagnostics.orphan_lines,
            "parsed chat log"
        );

        ParseOutcome {
            records,
            diagnostics,
        }
    }

    /// Parses export content held in memory.
    ///
    /// Lines end at `\r\n`, `\n` or a bare `\r`.
    pub fn parse_str(&self, content: &str) -> ParseOutcome {
        self.parse_lines(split_lines(content))
    }

    /// Parses decoded export text.
    pub fn parse_source(&self, source: &SourceText) -> ParseOutcome {
        self.parse_lines(source.lines())
    }

    /// Reads, decodes and parses an export file.
    ///
    /// The only possible error is an unreadable file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<ParseOutcome> {
        let source = read_source(path)?;
        Ok(self.parse_source(&source))
    }
}
