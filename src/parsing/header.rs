//! Line normalization and the header-line matcher.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Header grammar: `<date>, <time> - <author>: <body>`.
///
/// - date: `D{1,2}/D{1,2}/D{2,4}`
/// - time: `D{1,2}:D{2}:D{2}`
/// - author: shortest run of text before the first `:` that is followed by
///   whitespace, so `Re:Work: hi` has author `Re:Work`
///
/// Digits are ASCII only. `\d` in the regex crate is Unicode-aware and would
/// accept e.g. Arabic-Indic digits.
pub const HEADER_PATTERN: &str =
    r"^([0-9]{1,2}/[0-9]{1,2}/[0-9]{2,4}),\s+([0-9]{1,2}:[0-9]{2}:[0-9]{2})\s+-\s+(.*?):\s+(.*)$";

static HEADER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HEADER_PATTERN).expect("HEADER_PATTERN is a valid regex"));

/// Invisible formatting characters that clients inject around header fields.
///
/// Left-to-right / right-to-left / Arabic letter marks, the bidi embedding and
/// override controls, the bidi isolates, and a byte order mark left over from
/// the first line of a UTF-8 file.
pub const INVISIBLE_MARKS: &[char] = &[
    '\u{200E}', // LEFT-TO-RIGHT MARK
    '\u{200F}', // RIGHT-TO-LEFT MARK
    '\u{061C}', // ARABIC LETTER MARK
    '\u{202A}', '\u{202B}', '\u{202C}', '\u{202D}', '\u{202E}',
    '\u{2066}', '\u{2067}', '\u{2068}', '\u{2069}',
    '\u{FEFF}', // BOM
];

/// Returns `true` for characters removed by [`normalize_line`].
pub fn is_invisible_mark(c: char) -> bool {
    INVISIBLE_MARKS.contains(&c)
}

/// Removes invisible marks, then trims surrounding whitespace.
///
/// Marks are removed first so that a mark sitting outside the whitespace
/// (`"\u{200E} 1/2/24, ..."`) cannot shield it from trimming.
pub fn normalize_line(raw: &str) -> Cow<'_, str> {
    if raw.contains(is_invisible_mark) {
        let cleaned: String = raw.chars().filter(|&c| !is_invisible_mark(c)).collect();
        Cow::Owned(cleaned.trim().to_string())
    } else {
        Cow::Borrowed(raw.trim())
    }
}

/// Fields captured from a header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderFields<'a> {
    pub date: &'a str,
    pub time: &'a str,
    pub author: &'a str,
    pub body: &'a str,
}

impl<'a> HeaderFields<'a> {
    /// Matches an already-normalized line against the header grammar.
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = HEADER_REGEX.captures(line)?;
        Some(Self {
            date: caps.get(1).map_or("", |m| m.as_str()),
            time: caps.get(2).map_or("", |m| m.as_str()),
            author: caps.get(3).map_or("", |m| m.as_str()),
            body: caps.get(4).map_or("", |m| m.as_str()),
        })
    }
}

/// Returns `true` if the normalized line is a header line.
pub fn is_header_line(line: &str) -> bool {
    HEADER_REGEX.is_match(line)
}
