//! # Chatsift
//!
//! A Rust library for turning raw, human-readable chat exports into ordered,
//! structured message records.
//!
//! ## Overview
//!
//! A messaging client's text export is a sequence of lines like
//!
//! ```text
//! 12/31/23, 23:59:58 - Alice: Happy new year
//! see you all tomorrow
//! 12/31/23, 23:59:59 - Bob: <Media omitted>
//! ```
//!
//! Chatsift reassembles multi-line messages, strips invisible direction
//! marks, drops system and media placeholders, and returns one
//! [`MessageRecord`] per surviving message along with diagnostic counters.
//! Messages come out in source order; dates and times stay exactly as the
//! export wrote them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatsift::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let outcome = ChatLogParser::new().parse_file("data/raw/_chat.txt")?;
//!     println!("{}", outcome.diagnostics);
//!
//!     write_csv(&outcome.records, "data/processed/chat_history.csv", &OutputConfig::new())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming for Large Files
//!
//! ```rust,no_run
//! use chatsift::config::{ParserConfig, StreamingConfig};
//! use chatsift::streaming::RecordStream;
//!
//! let stream = RecordStream::open("huge_export.txt", &ParserConfig::default(), StreamingConfig::default())?;
//! for record in stream {
//!     let record = record?;
//!     println!("{}: {}", record.author, record.content);
//! }
//! # Ok::<(), chatsift::ChatsiftError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`ChatLogParser`](parser::ChatLogParser), [`ParseOutcome`](parser::ParseOutcome)
//! - [`parsing`] - Header matching, line normalization and message assembly
//! - [`denylist`] - Placeholder phrases that mark a message for removal
//! - [`config`] - [`ParserConfig`](config::ParserConfig), [`StreamingConfig`](config::StreamingConfig)
//! - [`source`] - Reading and decoding export files
//! - [`record`] - [`MessageRecord`], [`DateOrder`]
//! - [`core`] - Diagnostics, output configuration and format writers
//! - [`format`] - [`OutputFormat`](format::OutputFormat) selection
//! - [`streaming`] - Line-at-a-time record reader
//! - [`error`] - [`ChatsiftError`], [`Result`]
//! - [`prelude`] - Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod denylist;
pub mod error;
pub mod format;
#[cfg(feature = "cli")]
pub mod logging;
pub mod parser;
pub mod parsing;
pub mod record;
pub mod source;
#[cfg(feature = "streaming")]
pub mod streaming;

// Re-export the main types at the crate root for convenience
pub use error::{ChatsiftError, Result};
pub use record::{DateOrder, MessageRecord};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatsift::prelude::*;
///
/// let outcome = ChatLogParser::new().parse_str("1/2/24, 10:00:00 - Alice: Hi");
/// assert_eq!(outcome.records[0].author, "Alice");
/// ```
pub mod prelude {
    pub use crate::error::{ChatsiftError, Result};
    pub use crate::record::{DateOrder, MessageRecord};

    pub use crate::config::{ParserConfig, StreamingConfig};
    pub use crate::core::diagnostics::ParseDiagnostics;
    pub use crate::core::models::OutputConfig;
    pub use crate::denylist::{Denylist, DenylistEntry, PlaceholderKind};
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
    pub use crate::parser::{ChatLogParser, ParseOutcome};
    pub use crate::source::{SourceEncoding, SourceText, read_source};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    #[cfg(feature = "streaming")]
    pub use crate::streaming::RecordStream;
}
