//! Unified error types for chatsift.
//!
//! The parser itself is a total function over its input and never fails.
//! Everything that *can* fail lives at the edges: reading the raw export,
//! loading a custom denylist, and writing records out. Those edges share the
//! single [`ChatsiftError`] enum defined here.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatsift operations.
///
/// # Example
///
/// ```rust
/// use chatsift::error::Result;
/// use chatsift::MessageRecord;
///
/// fn load() -> Result<Vec<MessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatsiftError>;

/// The error type for all fallible chatsift operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatsiftError {
    /// An I/O error occurred while writing output or reading a config file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The raw chat export could not be read.
    ///
    /// This is the only failure of the text source. Once text has been
    /// decoded, parsing cannot fail.
    #[error("Cannot read chat export {}: {source}", path.display())]
    SourceUnreadable {
        /// Path that was requested
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// A format name or file extension was not recognized, or the format's
    /// feature is disabled.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// What kind of format was expected (e.g. "output")
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// A user-supplied denylist is unusable.
    #[error("Invalid denylist: {message}")]
    InvalidDenylist {
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization / deserialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatsiftError {
    /// Creates a source-unreadable error for `path`.
    pub fn source_unreadable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ChatsiftError::SourceUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatsiftError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid denylist error.
    pub fn invalid_denylist(message: impl Into<String>) -> Self {
        ChatsiftError::InvalidDenylist {
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatsiftError::Io(_))
    }

    /// Returns `true` if the chat export itself could not be read.
    pub fn is_source_unreadable(&self) -> bool {
        matches!(self, ChatsiftError::SourceUnreadable { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatsiftError::InvalidFormat { .. })
    }

    /// Returns `true` if this is an invalid denylist error.
    pub fn is_invalid_denylist(&self) -> bool {
        matches!(self, ChatsiftError::InvalidDenylist { .. })
    }
}
