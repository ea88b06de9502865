//! Reading and decoding raw chat exports.
//!
//! Exports are usually UTF-8, but older Android clients and some desktop
//! tools write a single-byte Latin-1 family encoding. Decoding tries strict
//! UTF-8 first and falls back to Latin-1, which maps every byte to the code
//! point of the same value and therefore never fails.
//!
//! The encoding is decided once for the whole export, never per line, so an
//! in-memory parse and a stream over the same file see the same characters.
//! Lines end at `\r\n`, `\n` or a bare `\r` (see [`split_lines`]).
//!
//! # Example
//!
//! ```rust
//! use chatsift::source::{SourceEncoding, decode_bytes};
//!
//! let text = decode_bytes(b"1/2/24, 10:00:00 - Jos\xe9: Ol\xe1");
//! assert_eq!(text.encoding(), SourceEncoding::Latin1);
//! assert_eq!(text.as_str(), "1/2/24, 10:00:00 - José: Olá");
//! ```

use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::iter::FusedIterator;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ChatsiftError, Result};

/// Which decoding path produced a [`SourceText`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceEncoding {
    /// Valid UTF-8
    Utf8,
    /// Latin-1 (ISO-8859-1) fallback
    Latin1,
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceEncoding::Utf8 => write!(f, "UTF-8"),
            SourceEncoding::Latin1 => write!(f, "Latin-1"),
        }
    }
}

/// Decoded export text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    text: String,
    encoding: SourceEncoding,
}

impl SourceText {
    /// Wraps already-decoded text.
    pub fn new(text: impl Into<String>, encoding: SourceEncoding) -> Self {
        Self {
            text: text.into(),
            encoding,
        }
    }

    /// The decoded text.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Which decoding path was taken.
    pub fn encoding(&self) -> SourceEncoding {
        self.encoding
    }

    /// Iterates over physical lines.
    pub fn lines(&self) -> PhysicalLines<'_> {
        split_lines(&self.text)
    }

    /// Consumes the wrapper.
    pub fn into_string(self) -> String {
        self.text
    }
}

/// Iterator returned by [`split_lines`].
#[derive(Debug, Clone)]
pub struct PhysicalLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for PhysicalLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        match self.rest.find(['\r', '\n']) {
            Some(pos) => {
                let line = &self.rest[..pos];
                let terminator = if self.rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                self.rest = &self.rest[pos + terminator..];
                Some(line)
            }
            None => Some(std::mem::take(&mut self.rest)),
        }
    }
}

impl FusedIterator for PhysicalLines<'_> {}

/// Splits text into physical lines on `\r\n`, `\n` or a bare `\r`.
///
/// Terminators are not part of the yielded lines, and a terminator at the
/// very end does not produce an empty last line.
///
/// ```rust
/// use chatsift::source::split_lines;
///
/// let lines: Vec<_> = split_lines("a\rb\r\nc\n\nd\r").collect();
/// assert_eq!(lines, ["a", "b", "c", "", "d"]);
/// ```
pub fn split_lines(text: &str) -> PhysicalLines<'_> {
    PhysicalLines { rest: text }
}

/// Decodes a single byte slice as Latin-1.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Decodes bytes as UTF-8, falling back to Latin-1 for the whole input.
pub fn decode_bytes(bytes: &[u8]) -> SourceText {
    match std::str::from_utf8(bytes) {
        Ok(text) => SourceText::new(text, SourceEncoding::Utf8),
        Err(e) => {
            warn!(
                valid_up_to = e.valid_up_to(),
                "input is not valid UTF-8, decoding as Latin-1"
            );
            SourceText::new(decode_latin1(bytes), SourceEncoding::Latin1)
        }
    }
}

/// Decides the encoding of a whole input without holding it in memory.
///
/// Returns [`SourceEncoding::Utf8`] only if every byte up to end of input is
/// valid UTF-8, which is the same rule [`decode_bytes`] applies.
pub fn detect_encoding<R: Read>(mut reader: R) -> io::Result<SourceEncoding> {
    let mut chunk = vec![0_u8; 64 * 1024];
    // Bytes of a multi-byte sequence cut off at the end of the last read.
    let mut carry = 0;
    loop {
        let n = match reader.read(&mut chunk[carry..]) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if n == 0 {
            return Ok(if carry == 0 {
                SourceEncoding::Utf8
            } else {
                SourceEncoding::Latin1
            });
        }

        let filled = carry + n;
        match std::str::from_utf8(&chunk[..filled]) {
            Ok(_) => carry = 0,
            Err(e) if e.error_len().is_none() => {
                let valid = e.valid_up_to();
                chunk.copy_within(valid..filled, 0);
                carry = filled - valid;
            }
            Err(_) => return Ok(SourceEncoding::Latin1),
        }
    }
}

/// Reads and decodes a chat export.
///
/// Failing to read the file is the only error in the whole pipeline before
/// output; it is reported as [`ChatsiftError::SourceUnreadable`].
pub fn read_source(path: impl AsRef<Path>) -> Result<SourceText> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| ChatsiftError::source_unreadable(path, e))?;
    debug!(path = %path.display(), bytes = bytes.len(), "read chat export");
    Ok(decode_bytes(&bytes))
}
