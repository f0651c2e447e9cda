//! Synthetic tail generation.
//!
//! After the real lines run out, follow mode keeps the stream alive by
//! repeating the last message one second at a time. The stream is lazy and
//! infinite unless a cycle cap is given.

use crate::output::mock_message;

/// Cursor advance per synthetic line, in seconds
pub const FOLLOW_STEP_SECS: f64 = 1.0;

/// One fabricated line
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticLine {
    /// Shifted timestamp of this line
    pub timestamp: f64,
    /// Message, already tagged as synthetic
    pub message: String,
}

/// Lazy sequence of synthetic lines
#[derive(Debug, Clone)]
pub struct FollowStream {
    message: String,
    cursor: f64,
    emitted: u64,
    cap: Option<u64>,
}

impl FollowStream {
    /// Start after `cursor`, repeating `message`
    #[must_use]
    pub fn new(message: &str, cursor: f64) -> Self {
        Self {
            message: mock_message(message),
            cursor,
            emitted: 0,
            cap: None,
        }
    }

    /// Stop after `cap` lines
    #[must_use]
    pub fn with_cap(mut self, cap: Option<u64>) -> Self {
        self.cap = cap;
        self
    }

    /// Timestamp of the most recently produced line
    #[must_use]
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    /// Lines produced so far
    #[must_use]
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl Iterator for FollowStream {
    type Item = SyntheticLine;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cap.is_some_and(|cap| self.emitted >= cap) {
            return None;
        }
        self.cursor += FOLLOW_STEP_SECS;
        self.emitted += 1;
        Some(SyntheticLine {
            timestamp: self.cursor,
            message: self.message.clone(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cap {
            Some(cap) => {
                let left = usize::try_from(cap.saturating_sub(self.emitted)).unwrap_or(usize::MAX);
                (left, Some(left))
            }
            None => (usize::MAX, None),
        }
    }
}
