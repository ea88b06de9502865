//! Integration tests for the streaming record reader.

#![cfg(feature = "streaming")]

use chatsift::config::ParserConfig;
use chatsift::parser::ChatLogParser;
use chatsift::source::SourceEncoding;
use chatsift::streaming::{RecordStream, StreamingConfig};
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

/// Helper to create an export file with `count` messages, every third one
/// spanning two lines and every fifth one a media placeholder.
fn create_export_file(count: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();

    for i in 0..count {
        let author = if i % 2 == 0 { "Alice" } else { "Bob" };
        let minute = i % 60;
        if i % 5 == 0 {
            writeln!(file, "1/2/24, 10:{minute:02}:00 - {author}: <Media omitted>").unwrap();
        } else if i % 3 == 0 {
            writeln!(file, "1/2/24, 10:{minute:02}:00 - {author}: Message number {i}").unwrap();
            writeln!(file, "continued {i}").unwrap();
        } else {
            writeln!(file, "1/2/24, 10:{minute:02}:00 - {author}: Message number {i}").unwrap();
        }
    }

    file.flush().unwrap();
    file
}

#[test]
fn test_stream_matches_in_memory_parse() {
    let file = create_export_file(500);
    let config = ParserConfig::default();

    let streamed: Vec<_> = RecordStream::open(file.path(), &config, StreamingConfig::default())
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    let parsed = ChatLogParser::new().parse_file(file.path()).unwrap();

    assert_eq!(streamed, parsed.records);
    assert_eq!(streamed.len(), 400);
}

#[test]
fn test_stream_diagnostics_match_in_memory_parse() {
    let file = create_export_file(120);
    let config = ParserConfig::default();

    let mut stream = RecordStream::open(file.path(), &config, StreamingConfig::default()).unwrap();
    for record in &mut stream {
        record.unwrap();
    }
    let parsed = ChatLogParser::new().parse_file(file.path()).unwrap();

    assert_eq!(stream.diagnostics(), &parsed.diagnostics);
}

#[test]
fn test_stream_multi_line_join() {
    let file = create_export_file(4);
    let records: Vec<_> = RecordStream::open(
        file.path(),
        &ParserConfig::default(),
        StreamingConfig::default(),
    )
    .unwrap()
    .map(Result::unwrap)
    .collect();

    // i = 0 is a placeholder, i = 3 spans two lines
    assert_eq!(records.len(), 3);
    assert_eq!(records[2].content, "Message number 3 continued 3");
}

#[test]
fn test_stream_progress() {
    let file = create_export_file(50);
    let size = std::fs::metadata(file.path()).unwrap().len();

    let mut stream = RecordStream::open(
        file.path(),
        &ParserConfig::default(),
        StreamingConfig::new().with_buffer_size(1024),
    )
    .unwrap();

    assert_eq!(stream.total_bytes(), Some(size));
    assert_eq!(stream.progress(), Some(0.0));

    while stream.next().is_some() {}

    assert_eq!(stream.bytes_processed(), size);
    let progress = stream.progress().unwrap();
    assert!((progress - 100.0).abs() < f64::EPSILON);
}

#[test]
fn test_stream_without_total_has_no_progress() {
    let stream = RecordStream::new(Cursor::new("1/2/24, 10:00:00 - A: b"), &ParserConfig::default());
    assert_eq!(stream.progress(), None);
}

#[test]
fn test_stream_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = RecordStream::open(
        dir.path().join("nope.txt"),
        &ParserConfig::default(),
        StreamingConfig::default(),
    )
    .err()
    .unwrap();
    assert!(err.is_source_unreadable());
}

fn write_bytes(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_open_agrees_with_parse_file_on_mixed_encoding() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice("1/2/24, 10:00:00 - João: tudo bem?\n".as_bytes());
    bytes.extend_from_slice(b"1/2/24, 10:00:01 - Jos\xe9: sim, obrigado\n");
    let file = write_bytes(&bytes);

    let config = ParserConfig::default();
    let parsed = ChatLogParser::with_config(config.clone())
        .parse_file(file.path())
        .unwrap();
    let mut stream = RecordStream::open(file.path(), &config, StreamingConfig::default()).unwrap();
    let streamed: Vec<_> = stream.by_ref().map(Result::unwrap).collect();

    assert_eq!(streamed, parsed.records);
    assert_eq!(streamed[0].author, "JoÃ£o");
    assert_eq!(streamed[1].author, "José");
    assert_eq!(stream.encoding(), Some(SourceEncoding::Latin1));
    assert_eq!(stream.latin1_lines(), 2);
}

#[test]
fn test_open_detects_utf8_file() {
    let file = write_bytes("1/2/24, 10:00:00 - João: Olá\n".as_bytes());
    let mut stream =
        RecordStream::open(file.path(), &ParserConfig::default(), StreamingConfig::default())
            .unwrap();

    assert_eq!(stream.encoding(), Some(SourceEncoding::Utf8));
    assert_eq!(stream.next().unwrap().unwrap().author, "João");
    assert_eq!(stream.latin1_lines(), 0);
}

#[test]
fn test_stream_without_known_encoding_decodes_per_line() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice("1/2/24, 10:00:00 - João: tudo bem?\n".as_bytes());
    bytes.extend_from_slice(b"1/2/24, 10:00:01 - Jos\xe9: sim, obrigado\n");

    let mut stream = RecordStream::new(Cursor::new(bytes), &ParserConfig::default());
    let records: Vec<_> = stream.by_ref().map(Result::unwrap).collect();

    assert_eq!(stream.encoding(), None);
    assert_eq!(records[0].author, "João");
    assert_eq!(records[1].author, "José");
    assert_eq!(stream.latin1_lines(), 1);
}

#[test]
fn test_open_cr_only_matches_parse_str() {
    let text = "Messages and calls are end-to-end encrypted.\r\
                1/2/24, 10:00:00 - Alice: Hello\rworld\r\
                2/2/24, 11:00:00 - Bob: <Media omitted>\r\
                2/2/24, 11:00:05 - Bob: Hi\r";
    let file = write_bytes(text.as_bytes());

    let config = ParserConfig::default();
    let expected = ChatLogParser::with_config(config.clone()).parse_str(text);
    let mut stream = RecordStream::open(file.path(), &config, StreamingConfig::default()).unwrap();
    let streamed: Vec<_> = stream.by_ref().map(Result::unwrap).collect();

    assert_eq!(streamed.len(), 2);
    assert_eq!(streamed, expected.records);
    assert_eq!(*stream.diagnostics(), expected.diagnostics);
}

#[test]
fn test_stream_custom_denylist() {
    let config = ParserConfig::new().with_extra_phrase(
        chatsift::denylist::PlaceholderKind::MediaOmitted,
        "[photo]",
    );
    let input = "1/2/24, 10:00:00 - Alice: [photo]\n1/2/24, 10:00:01 - Bob: hi\n";
    let records: Vec<_> = RecordStream::new(Cursor::new(input), &config)
        .map(Result::unwrap)
        .collect();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].author, "Bob");
}

#[test]
fn test_stream_empty_input() {
    let mut stream = RecordStream::new(Cursor::new(""), &ParserConfig::default());
    assert!(stream.next().is_none());
    assert!(stream.diagnostics().is_zero_yield());
}
