//! The structured message record produced by the parser.
//!
//! # Examples
//!
//! ```
//! use chatsift::MessageRecord;
//!
//! let record = MessageRecord::new("1/2/24", "10:00:00", "Alice", "Hello world");
//! assert_eq!(record.author(), "Alice");
//! assert_eq!(record.content(), "Hello world");
//! ```
//!
//! Dates and times are kept exactly as the export wrote them. Consumers that
//! need real timestamps choose the locale's field order explicitly:
//!
//! ```
//! use chatsift::{DateOrder, MessageRecord};
//!
//! let record = MessageRecord::new("2/15/23", "14:20:48", "Bob", "Hi");
//! let ts = record.timestamp(DateOrder::MonthFirst).unwrap();
//! assert_eq!(ts.to_string(), "2023-02-15 14:20:48");
//! assert!(record.timestamp(DateOrder::DayFirst).is_none());
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One message of a chat export.
///
/// | Field | Description |
/// |-------|-------------|
/// | `date` | Calendar date in the export's native layout (e.g. `2/15/23`) |
/// | `time` | Time of day as written (e.g. `14:20:48`) |
/// | `author` | Display name exactly as it appears in the header line |
/// | `content` | Full body; multi-line messages are joined with single spaces |
///
/// Records coming out of the parser always have a non-empty `author` and a
/// `content` free of the newlines that separated its physical lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Calendar date, source format.
    pub date: String,

    /// Time of day, source format.
    pub time: String,

    /// Display name of the sender.
    pub author: String,

    /// Assembled message body.
    pub content: String,
}

/// Field order of the numeric date in an export.
///
/// The header grammar accepts both `M/D/Y` and `D/M/Y` layouts; only the
/// consumer knows which one its export uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    /// `month/day/year`, the US layout.
    #[default]
    MonthFirst,
    /// `day/month/year`, most other locales.
    DayFirst,
}

impl MessageRecord {
    /// Creates a record from its four fields.
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            author: author.into(),
            content: content.into(),
        }
    }

    /// Returns the date string.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the time string.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Returns the author name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Interprets `date` and `time` as a naive timestamp.
    ///
    /// Two-digit years follow chrono's `%y` rule (`00..=68` is 20xx).
    /// Returns `None` when the fields do not form a valid date under `order`.
    pub fn timestamp(&self, order: DateOrder) -> Option<NaiveDateTime> {
        let year = self.date.rsplit('/').next()?;
        let date_format = match (order, year.len()) {
            (DateOrder::MonthFirst, 2) => "%m/%d/%y",
            (DateOrder::MonthFirst, _) => "%m/%d/%Y",
            (DateOrder::DayFirst, 2) => "%d/%m/%y",
            (DateOrder::DayFirst, _) => "%d/%m/%Y",
        };

        let datetime = format!("{} {}", self.date, self.time);
        NaiveDateTime::parse_from_str(&datetime, &format!("{date_format} %H:%M:%S")).ok()
    }

    /// Renders the record back into the header grammar it was parsed from.
    ///
    /// A multi-line message comes back as a single line, so re-parsing the
    /// rendered text yields the same record.
    pub fn to_header_line(&self) -> String {
        format!(
            "{}, {} - {}: {}",
            self.date, self.time, self.author, self.content
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_record_new() {
        let record = MessageRecord::new("1/2/24", "10:00:00", "Alice", "Hello");
        assert_eq!(record.date(), "1/2/24");
        assert_eq!(record.time(), "10:00:00");
        assert_eq!(record.author(), "Alice");
        assert_eq!(record.content(), "Hello");
    }

    #[test]
    fn test_timestamp_month_first() {
        let record = MessageRecord::new("2/15/23", "14:20:48", "Alice", "Hi");
        let ts = record.timestamp(DateOrder::MonthFirst).unwrap();
        assert_eq!(ts.year(), 2023);
        assert_eq!(ts.month(), 2);
        assert_eq!(ts.day(), 15);
        assert_eq!(ts.hour(), 14);
        assert_eq!(ts.second(), 48);
    }

    #[test]
    fn test_timestamp_day_first_four_digit_year() {
        let record = MessageRecord::new("15/01/2024", "9:05:00", "Alice", "Hi");
        let ts = record.timestamp(DateOrder::DayFirst).unwrap();
        assert_eq!(ts.year(), 2024);
        assert_eq!(ts.month(), 1);
        assert_eq!(ts.day(), 15);
        assert_eq!(ts.hour(), 9);
    }

    #[test]
    fn test_timestamp_wrong_order_is_none() {
        let record = MessageRecord::new("15/01/2024", "10:00:00", "Alice", "Hi");
        assert!(record.timestamp(DateOrder::MonthFirst).is_none());
    }

    #[test]
    fn test_timestamp_garbage_is_none() {
        let record = MessageRecord::new("", "", "Alice", "Hi");
        assert!(record.timestamp(DateOrder::MonthFirst).is_none());
    }

    #[test]
    fn test_to_header_line() {
        let record = MessageRecord::new("1/2/24", "10:00:00", "Alice", "Hello world");
        assert_eq!(record.to_header_line(), "1/2/24, 10:00:00 - Alice: Hello world");
    }

    #[test]
    fn test_date_order_default() {
        assert_eq!(DateOrder::default(), DateOrder::MonthFirst);
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_record_serialization() {
        let record = MessageRecord::new("1/2/24", "10:00:00", "Alice", "Hello");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"date":"1/2/24","time":"10:00:00","author":"Alice","content":"Hello"}"#
        );
        let back: MessageRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
