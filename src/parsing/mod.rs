//! Shared parsing machinery.
//!
//! This module contains the pieces used by both the in-memory
//! [`ChatLogParser`](crate::parser::ChatLogParser) and the streaming reader:
//! line normalization, the header matcher, and the [`Assembler`] state
//! machine.

pub mod assembler;
pub mod header;

pub use assembler::{Assembler, Finalized, PendingMessage};
pub use header::{
    HEADER_PATTERN, HeaderFields, INVISIBLE_MARKS, is_header_line, is_invisible_mark,
    normalize_line,
};
