//! Line-by-line record reader.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

use tracing::{debug, warn};

use crate::MessageRecord;
use crate::config::{ParserConfig, StreamingConfig};
use crate::core::diagnostics::ParseDiagnostics;
use crate::error::{ChatsiftError, Result};
use crate::parsing::Assembler;
use crate::source::{SourceEncoding, decode_latin1, detect_encoding};

/// Iterator over records read from any [`BufRead`].
///
/// A record is yielded as soon as the next header line (or end of input)
/// finalizes it, so memory use is bounded by the longest single message.
/// Lines end at `\r\n`, `\n` or a bare `\r`, including a `\r\n` pair
/// split across two buffer fills.
///
/// [`RecordStream::open`] decides the encoding for the whole file before the
/// first line is read, exactly like [`read_source`](crate::source::read_source),
/// so it yields the same records as
/// [`ChatLogParser::parse_file`](crate::parser::ChatLogParser::parse_file)
/// for any input. A stream built with [`new`](RecordStream::new) over a
/// reader of unknown encoding cannot look ahead; it decodes each line as
/// UTF-8 and falls back to Latin-1 for that line alone, unless
/// [`with_encoding`](RecordStream::with_encoding) fixes the encoding.
pub struct RecordStream<R: BufRead> {
    reader: R,
    assembler: Assembler<'static>,
    buffer: Vec<u8>,
    encoding: Option<SourceEncoding>,
    /// The previous line ended in `\r`; a leading `\n` belongs to it.
    after_cr: bool,
    bytes_read: u64,
    total_bytes: Option<u64>,
    latin1_lines: usize,
    finished: bool,
}

impl<R: BufRead> RecordStream<R> {
    /// Wraps a reader whose encoding is not known up front.
    pub fn new(reader: R, config: &ParserConfig) -> Self {
        Self {
            reader,
            assembler: Assembler::owned(config.denylist().clone()),
            buffer: Vec::with_capacity(4096),
            encoding: None,
            after_cr: false,
            bytes_read: 0,
            total_bytes: None,
            latin1_lines: 0,
            finished: false,
        }
    }

    /// Decodes every line with one encoding instead of deciding per line.
    #[must_use]
    pub fn with_encoding(mut self, encoding: SourceEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Sets the expected input size, enabling [`progress`](Self::progress).
    #[must_use]
    pub fn with_total_bytes(mut self, total: u64) -> Self {
        self.total_bytes = Some(total);
        self
    }

    /// The whole-input encoding, if one was fixed.
    pub fn encoding(&self) -> Option<SourceEncoding> {
        self.encoding
    }

    /// Counters for the lines consumed so far.
    pub fn diagnostics(&self) -> &ParseDiagnostics {
        self.assembler.diagnostics()
    }

    /// Bytes consumed so far.
    pub fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    /// Total input size, if known.
    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    /// Approximate progress as a percentage (0.0 to 100.0).
    pub fn progress(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) | None => None,
            Some(total) => Some((self.bytes_read as f64 / total as f64) * 100.0),
        }
    }

    /// Number of lines decoded as Latin-1 so far.
    pub fn latin1_lines(&self) -> usize {
        self.latin1_lines
    }

    /// Reads the next physical line into `buffer`, without its terminator.
    ///
    /// Returns `false` at end of input.
    fn read_line(&mut self) -> io::Result<bool> {
        self.buffer.clear();
        let mut got_line = false;
        loop {
            let available = match self.reader.fill_buf() {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(got_line);
            }

            let start = usize::from(std::mem::take(&mut self.after_cr) && available[0] == b'\n');
            let (used, done) =
                match available[start..].iter().position(|&b| b == b'\n' || b == b'\r') {
                    Some(pos) => {
                        let end = start + pos;
                        self.buffer.extend_from_slice(&available[start..end]);
                        self.after_cr = available[end] == b'\r';
                        (end + 1, true)
                    }
                    None => {
                        self.buffer.extend_from_slice(&available[start..]);
                        got_line |= available.len() > start;
                        (available.len(), false)
                    }
                };

            self.reader.consume(used);
            self.bytes_read += used as u64;
            if done {
                return Ok(true);
            }
        }
    }
}

/// Decodes one line with the stream's encoding, counting Latin-1 lines.
fn decode_line<'a>(
    bytes: &'a [u8],
    encoding: Option<SourceEncoding>,
    latin1_lines: &mut usize,
) -> Cow<'a, str> {
    if encoding != Some(SourceEncoding::Latin1) {
        if let Ok(text) = std::str::from_utf8(bytes) {
            return Cow::Borrowed(text);
        }
    }
    *latin1_lines += 1;
    Cow::Owned(decode_latin1(bytes))
}

impl RecordStream<BufReader<File>> {
    /// Opens an export file for streaming.
    ///
    /// The file is read once up front to decide its encoding, then rewound.
    pub fn open(
        path: impl AsRef<Path>,
        config: &ParserConfig,
        streaming: StreamingConfig,
    ) -> Result<Self> {
        let path = path.as_ref();
        let unreadable = |e| ChatsiftError::source_unreadable(path, e);

        let file = File::open(path).map_err(unreadable)?;
        let total = file.metadata().map_err(unreadable)?.len();

        let mut reader = BufReader::with_capacity(streaming.buffer_size, file);
        let encoding = detect_encoding(&mut reader).map_err(unreadable)?;
        reader.seek(SeekFrom::Start(0)).map_err(unreadable)?;

        if encoding == SourceEncoding::Latin1 {
            warn!(path = %path.display(), "input is not valid UTF-8, decoding as Latin-1");
        }
        debug!(path = %path.display(), bytes = total, %encoding, "streaming chat export");

        Ok(Self::new(reader, config)
            .with_encoding(encoding)
            .with_total_bytes(total))
    }
}

impl<R: BufRead> Iterator for RecordStream<R> {
    type Item = Result<MessageRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.read_line() {
                Ok(false) => {
                    self.finished = true;
                    if self.encoding.is_none() && self.latin1_lines > 0 {
                        warn!(
                            lines = self.latin1_lines,
                            "lines were not valid UTF-8 and were decoded as Latin-1"
                        );
                    }
                    return self.assembler.finish().map(Ok);
                }
                Ok(true) => {
                    let line = decode_line(&self.buffer, self.encoding, &mut self.latin1_lines);
                    if let Some(record) = self.assembler.push_line(&line) {
                        return Some(Ok(record));
                    }
                }
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample() -> &'static str {
        "Messages and calls are end-to-end encrypted.\n\
         1/2/24, 10:00:00 - Alice: Hello\n\
         world\n\
         2/2/24, 11:00:00 - Bob: <Media omitted>\n\
         2/2/24, 11:00:05 - Bob: Hi\n"
    }

    #[test]
    fn test_stream_yields_records_in_order() {
        let stream = RecordStream::new(Cursor::new(sample()), &ParserConfig::default());
        let records: Vec<_> = stream.map(|r| r.unwrap()).collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].content, "Hello world");
        assert_eq!(records[1].content, "Hi");
    }

    #[test]
    fn test_stream_diagnostics() {
        let mut stream = RecordStream::new(Cursor::new(sample()), &ParserConfig::default());
        while stream.next().is_some() {}

        let d = stream.diagnostics();
        assert_eq!(d.lines_read, 5);
        assert_eq!(d.header_matches, 3);
        assert_eq!(d.orphan_lines, 1);
        assert_eq!(d.records_emitted, 2);
        assert_eq!(d.records_discarded, 1);
    }

    #[test]
    fn test_stream_is_fused_after_end() {
        let mut stream = RecordStream::new(
            Cursor::new("1/2/24, 10:00:00 - Alice: Hello"),
            &ParserConfig::default(),
        );
        assert!(stream.next().is_some());
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_stream_latin1_line() {
        let bytes: &[u8] = b"1/2/24, 10:00:00 - Jos\xe9: Ol\xe1\n";
        let mut stream = RecordStream::new(Cursor::new(bytes), &ParserConfig::default());
        let record = stream.next().unwrap().unwrap();
        assert_eq!(record.author, "José");
        assert_eq!(stream.latin1_lines(), 1);
    }

    #[test]
    fn test_stream_progress() {
        let input = sample();
        let mut stream = RecordStream::new(Cursor::new(input), &ParserConfig::default())
            .with_total_bytes(input.len() as u64);
        assert_eq!(stream.progress(), Some(0.0));
        while stream.next().is_some() {}
        assert_eq!(stream.bytes_processed(), input.len() as u64);
        assert_eq!(stream.progress(), Some(100.0));
    }

    #[test]
    fn test_stream_unknown_total_has_no_progress() {
        let stream = RecordStream::new(Cursor::new(""), &ParserConfig::default());
        assert!(stream.progress().is_none());
        assert!(stream.total_bytes().is_none());
    }

    #[test]
    fn test_stream_bare_carriage_returns() {
        let input = "1/2/24, 10:00:00 - Alice: Hello\rworld\r2/2/24, 11:00:00 - Bob: Hi\r";
        let mut stream = RecordStream::new(Cursor::new(input), &ParserConfig::default())
            .with_total_bytes(input.len() as u64);
        let records: Vec<_> = stream.by_ref().map(|r| r.unwrap()).collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].content, "Hello world");
        assert_eq!(records[1].content, "Hi");
        assert_eq!(stream.diagnostics().lines_read, 3);
        assert_eq!(stream.bytes_processed(), input.len() as u64);
    }

    #[test]
    fn test_stream_crlf_split_across_fills() {
        // A 1-byte buffer forces every "\r\n" pair across two fills
        let input = "1/2/24, 10:00:00 - Alice: Hello\r\nworld\r\n\r\n2/2/24, 11:00:00 - Bob: Hi\r\n";
        let reader = io::BufReader::with_capacity(1, Cursor::new(input));
        let mut stream = RecordStream::new(reader, &ParserConfig::default());
        let records: Vec<_> = stream.by_ref().map(|r| r.unwrap()).collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].content, "Hello world");
        assert_eq!(stream.diagnostics().lines_read, 4);
        assert_eq!(stream.diagnostics().blank_lines, 1);
    }

    #[test]
    fn test_stream_fixed_latin1_encoding_applies_to_every_line() {
        let bytes: &[u8] = "1/2/24, 10:00:00 - João: Oi\n".as_bytes();
        let mut stream =
            RecordStream::new(Cursor::new(bytes), &ParserConfig::default())
                .with_encoding(SourceEncoding::Latin1);
        let record = stream.next().unwrap().unwrap();
        assert_eq!(record.author, "JoÃ£o");
        assert_eq!(stream.latin1_lines(), 1);
        assert_eq!(stream.encoding(), Some(SourceEncoding::Latin1));
    }

    #[test]
    fn test_open_missing_file() {
        let result = RecordStream::open(
            "/no/such/dir/_chat.txt",
            &ParserConfig::default(),
            StreamingConfig::default(),
        );
        assert!(matches!(result, Err(ChatsiftError::SourceUnreadable { .. })));
    }
}
