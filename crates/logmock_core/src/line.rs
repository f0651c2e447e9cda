//! Fixed-offset log line parsing.
//!
//! A line looks like one of
//!
//! ```text
//! Mon Jan 15 10:00:00 2024 kern.info kernel: message
//! Mon Jan 15 10:00:00 2024 [1705312800.123] kern.info kernel: message
//! ```
//!
//! Fields are found by character offset, never by scanning. The bracketed
//! form is recognised only by a `[` at offset 25.

use crate::time::{parse_calendar, CALENDAR_WIDTH};

/// Offset of the embedded timestamp digits
const EMBEDDED_START: usize = 26;
/// End (exclusive) of the embedded timestamp digits
const EMBEDDED_END: usize = 40;
/// Offset checked for the opening bracket
const BRACKET_OFFSET: usize = 25;
/// Message offset when the bracketed field is present
const BRACKETED_MESSAGE_START: usize = 42;
/// Message offset when only the calendar prefix is present
const PLAIN_MESSAGE_START: usize = 25;

/// Parsed view over one log line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogLine<'a> {
    raw: &'a str,
    embedded: Option<f64>,
    constructed: Option<f64>,
    message: &'a str,
}

impl<'a> LogLine<'a> {
    /// Parse a line. Never fails; unparseable fields come back as `None`.
    #[must_use]
    pub fn parse(raw: &'a str) -> Self {
        let embedded = char_range(raw, EMBEDDED_START, Some(EMBEDDED_END))
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|ts| ts.is_finite());

        let constructed = parse_calendar(char_range(raw, 0, Some(CALENDAR_WIDTH)));

        let message_start = if raw.chars().nth(BRACKET_OFFSET) == Some('[') {
            BRACKETED_MESSAGE_START
        } else {
            PLAIN_MESSAGE_START
        };

        Self {
            raw,
            embedded,
            constructed,
            message: char_range(raw, message_start, None),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        raw: &'a str,
        embedded: Option<f64>,
        constructed: Option<f64>,
        message: &'a str,
    ) -> Self {
        Self {
            raw,
            embedded,
            constructed,
            message,
        }
    }

    /// The line as given
    #[must_use]
    pub fn raw(&self) -> &'a str {
        self.raw
    }

    /// High-precision timestamp from the bracketed field
    #[must_use]
    pub fn embedded_timestamp(&self) -> Option<f64> {
        self.embedded
    }

    /// Timestamp parsed from the calendar prefix in local time
    #[must_use]
    pub fn constructed_timestamp(&self) -> Option<f64> {
        self.constructed
    }

    /// Payload after the timestamp fields
    #[must_use]
    pub fn message(&self) -> &'a str {
        self.message
    }

    /// A line is valid when at least one timestamp parsed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.embedded.is_some() || self.constructed.is_some()
    }
}

/// Slice by character offsets, clamping to the end of the string.
fn char_range(s: &str, start: usize, end: Option<usize>) -> &str {
    let byte_at = |n: usize| s.char_indices().nth(n).map_or(s.len(), |(i, _)| i);
    let from = byte_at(start);
    let to = end.map_or(s.len(), byte_at);
    if from >= to { "" } else { &s[from..to] }
}
