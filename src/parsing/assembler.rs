//! The message assembler: a two-state machine over normalized lines.
//!
//! States are "no pending message" and "pending message". The only
//! transition trigger is a header match: it finalizes whatever is pending and
//! opens a new pending message. Every other non-blank line is either appended
//! to the pending message or, when nothing is pending, counted as an orphan
//! and dropped.
//!
//! Both [`ChatLogParser`](crate::parser::ChatLogParser) and the streaming
//! reader drive the same assembler, so they cannot disagree on message
//! boundaries.

use std::borrow::Cow;

use tracing::debug;

use crate::MessageRecord;
use crate::core::diagnostics::ParseDiagnostics;
use crate::denylist::{Denylist, PlaceholderKind};

use super::header::{HeaderFields, normalize_line};

/// Outcome of finalizing a pending message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finalized {
    /// The message is conversational and becomes a record.
    Emit(MessageRecord),
    /// The assembled content contains a denylisted phrase.
    Drop(PlaceholderKind),
}

/// A message whose body is still being collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMessage {
    date: String,
    time: String,
    author: String,
    fragments: Vec<String>,
}

impl PendingMessage {
    /// Opens a pending message from a header.
    ///
    /// Returns `None` for an empty author: such a message could never be
    /// emitted, so its continuation lines are treated as orphans.
    pub fn open(header: &HeaderFields<'_>) -> Option<Self> {
        if header.author.is_empty() {
            return None;
        }
        Some(Self {
            date: header.date.to_string(),
            time: header.time.to_string(),
            author: header.author.to_string(),
            fragments: vec![header.body.to_string()],
        })
    }

    /// Appends one normalized continuation line.
    pub fn push_fragment(&mut self, fragment: impl Into<String>) {
        self.fragments.push(fragment.into());
    }

    /// Number of physical lines collected so far.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Joins the fragments and applies the denylist.
    pub fn finalize(self, denylist: &Denylist) -> Finalized {
        let content = self.fragments.join(" ");
        if let Some(entry) = denylist.find_match(&content) {
            debug!(
                author = %self.author,
                date = %self.date,
                time = %self.time,
                kind = %entry.kind,
                phrase = %entry.phrase,
                "discarding placeholder message"
            );
            return Finalized::Drop(entry.kind);
        }
        Finalized::Emit(MessageRecord {
            date: self.date,
            time: self.time,
            author: self.author,
            content,
        })
    }
}

/// Line-at-a-time record assembler.
///
/// ```rust
/// use chatsift::denylist::Denylist;
/// use chatsift::parsing::Assembler;
///
/// let denylist = Denylist::default();
/// let mut assembler = Assembler::new(&denylist);
///
/// assert!(assembler.push_line("1/2/24, 10:00:00 - Alice: Hello").is_none());
/// assert!(assembler.push_line("world").is_none());
/// let first = assembler.push_line("2/2/24, 11:00:00 - Bob: Hi").unwrap();
/// assert_eq!(first.content, "Hello world");
///
/// let last = assembler.finish().unwrap();
/// assert_eq!(last.author, "Bob");
/// ```
#[derive(Debug, Clone)]
pub struct Assembler<'a> {
    denylist: Cow<'a, Denylist>,
    pending: Option<PendingMessage>,
    diagnostics: ParseDiagnostics,
}

impl<'a> Assembler<'a> {
    /// Creates an assembler borrowing `denylist`.
    pub fn new(denylist: &'a Denylist) -> Self {
        Self {
            denylist: Cow::Borrowed(denylist),
            pending: None,
            diagnostics: ParseDiagnostics::default(),
        }
    }

    /// Creates an assembler that owns its denylist.
    pub fn owned(denylist: Denylist) -> Assembler<'static> {
        Assembler {
            denylist: Cow::Owned(denylist),
            pending: None,
            diagnostics: ParseDiagnostics::default(),
        }
    }

    /// Feeds one raw physical line.
    ///
    /// Returns the previous message if this line was a header that
    /// finalized it into a record.
    pub fn push_line(&mut self, raw: &str) -> Option<MessageRecord> {
        self.diagnostics.lines_read += 1;

        let line = normalize_line(raw);
        if line.is_empty() {
            self.diagnostics.blank_lines += 1;
            return None;
        }

        if let Some(header) = HeaderFields::parse(&line) {
            self.diagnostics.header_matches += 1;
            let finished = self.flush();
            self.pending = PendingMessage::open(&header);
            return finished;
        }

        match self.pending.as_mut() {
            Some(pending) => pending.push_fragment(line),
            None => self.diagnostics.orphan_lines += 1,
        }
        None
    }

    /// Finalizes the message still pending at end of input.
    ///
    /// Calling it again returns `None`.
    pub fn finish(&mut self) -> Option<MessageRecord> {
        self.flush()
    }

    /// Returns `true` if a message is being assembled.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Counters so far.
    pub fn diagnostics(&self) -> &ParseDiagnostics {
        &self.diagnostics
    }

    /// Consumes the assembler, returning its counters.
    ///
    /// Any still-pending message is discarded uncounted; call
    /// [`finish`](Self::finish) first.
    pub fn into_diagnostics(self) -> ParseDiagnostics {
        self.diagnostics
    }

    fn flush(&mut self) -> Option<MessageRecord> {
        let pending = self.pending.take()?;
        match pending.finalize(&self.denylist) {
            Finalized::Emit(record) => {
                self.diagnostics.records_emitted += 1;
                Some(record)
            }
            Finalized::Drop(_) => {
                self.diagnostics.records_discarded += 1;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(author: &str, body: &str) -> String {
        format!("1/2/24, 10:00:00 - {author}: {body}")
    }

    #[test]
    fn test_pending_finalize_joins_with_single_space() {
        let line = header("Alice", "Hello");
        let fields = HeaderFields::parse(&line).unwrap();
        let mut pending = PendingMessage::open(&fields).unwrap();
        pending.push_fragment("big");
        pending.push_fragment("world");
        assert_eq!(pending.fragment_count(), 3);

        match pending.finalize(&Denylist::default()) {
            Finalized::Emit(record) => assert_eq!(record.content, "Hello big world"),
            Finalized::Drop(kind) => panic!("unexpected drop: {kind}"),
        }
    }

    #[test]
    fn test_pending_finalize_drops_placeholder() {
        let line = header("Alice", "<Media omitted>");
        let fields = HeaderFields::parse(&line).unwrap();
        let pending = PendingMessage::open(&fields).unwrap();
        assert_eq!(
            pending.finalize(&Denylist::default()),
            Finalized::Drop(PlaceholderKind::MediaOmitted)
        );
    }

    #[test]
    fn test_pending_open_rejects_empty_author() {
        let fields = HeaderFields {
            date: "1/2/24",
            time: "10:00:00",
            author: "",
            body: "hi",
        };
        assert!(PendingMessage::open(&fields).is_none());
    }

    #[test]
    fn test_assembler_counts() {
        let denylist = Denylist::default();
        let mut assembler = Assembler::new(&denylist);

        assert!(assembler.push_line("Chat preamble").is_none());
        assert!(assembler.push_line("").is_none());
        assert!(assembler.push_line(&header("Alice", "Hi")).is_none());
        assert!(assembler.push_line("there").is_none());
        assert!(assembler.push_line(&header("Bob", "<Media omitted>")).is_some());
        assert!(assembler.push_line(&header("Carol", "Bye")).is_none());
        assert!(assembler.finish().is_some());
        assert!(assembler.finish().is_none());

        let d = assembler.into_diagnostics();
        assert_eq!(d.lines_read, 6);
        assert_eq!(d.blank_lines, 1);
        assert_eq!(d.header_matches, 3);
        assert_eq!(d.orphan_lines, 1);
        assert_eq!(d.records_emitted, 2);
        assert_eq!(d.records_discarded, 1);
    }

    #[test]
    fn test_assembler_owned() {
        let mut assembler = Assembler::owned(Denylist::empty());
        assembler.push_line(&header("Alice", "<Media omitted>"));
        assert!(assembler.has_pending());
        let record = assembler.finish().unwrap();
        assert_eq!(record.content, "<Media omitted>");
        assert!(!assembler.has_pending());
    }
}
