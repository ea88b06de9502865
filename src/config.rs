//! Configuration types for the parser and the streaming reader.
//!
//! These are plain structs with builder methods and no CLI framework
//! dependencies.
//!
//! # Example
//!
//! ```rust
//! use chatsift::config::ParserConfig;
//! use chatsift::denylist::PlaceholderKind;
//! use chatsift::parser::ChatLogParser;
//!
//! let config = ParserConfig::new()
//!     .with_extra_phrase(PlaceholderKind::MediaOmitted, "<Medien ausgeschlossen>");
//!
//! let parser = ChatLogParser::with_config(config);
//! ```

use serde::{Deserialize, Serialize};

use crate::denylist::{Denylist, PlaceholderKind};

/// Configuration for [`ChatLogParser`](crate::parser::ChatLogParser).
///
/// The only knob that changes parsing outcome is the placeholder denylist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Phrases that cause an assembled message to be discarded
    #[serde(default)]
    pub denylist: Denylist,
}

impl ParserConfig {
    /// Creates a configuration with the default bilingual denylist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the denylist.
    #[must_use]
    pub fn with_denylist(mut self, denylist: Denylist) -> Self {
        self.denylist = denylist;
        self
    }

    /// Adds one phrase to the current denylist.
    #[must_use]
    pub fn with_extra_phrase(mut self, kind: PlaceholderKind, phrase: impl Into<String>) -> Self {
        self.denylist = self.denylist.with_phrase(kind, phrase);
        self
    }

    /// Returns the denylist.
    pub fn denylist(&self) -> &Denylist {
        &self.denylist
    }
}

/// Configuration for the line-by-line record reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamingConfig {
    /// Read buffer size in bytes (default: 64KB)
    pub buffer_size: usize,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            buffer_size: 64 * 1024, // 64KB
        }
    }
}

impl StreamingConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the read buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }
}
