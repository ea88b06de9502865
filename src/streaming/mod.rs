//! Streaming record reader for large exports.
//!
//! [`RecordStream`] reads one physical line at a time and yields records as
//! they are finalized, instead of loading the whole export and collecting
//! every record first.
//!
//! # Example
//!
//! ```rust,no_run
//! use chatsift::config::{ParserConfig, StreamingConfig};
//! use chatsift::streaming::RecordStream;
//!
//! let mut stream = RecordStream::open(
//!     "data/raw/_chat.txt",
//!     &ParserConfig::default(),
//!     StreamingConfig::default(),
//! )?;
//!
//! for record in &mut stream {
//!     let record = record?;
//!     println!("{}: {}", record.author, record.content);
//! }
//! println!("{}", stream.diagnostics());
//! # Ok::<(), chatsift::ChatsiftError>(())
//! ```
//!
//! # Memory Usage
//!
//! | Approach | 1GB export |
//! |----------|------------|
//! | [`ChatLogParser::parse_file`](crate::parser::ChatLogParser::parse_file) | whole file + all records |
//! | [`RecordStream`] | read buffer + one message |

mod reader;

pub use crate::config::StreamingConfig;
pub use reader::RecordStream;
