//! Replay configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Replay driver configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Emit the bracketed high-precision timestamp field
    pub extra_timestamp: bool,
    /// Only replay the last `count` lines
    pub count: Option<usize>,
    /// Keep emitting synthetic lines after the initial window
    pub follow: bool,
    /// Maximum synthetic lines in follow mode (0 = unlimited)
    pub max_cycles: u64,
    /// Pause between replayed lines
    pub line_delay: Duration,
    /// Pause between synthetic lines
    pub follow_interval: Duration,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            extra_timestamp: false,
            count: None,
            follow: false,
            max_cycles: 0,
            line_delay: Duration::ZERO,
            follow_interval: Duration::from_secs(1),
        }
    }
}

impl ReplayConfig {
    /// Toggle the extra timestamp field
    #[must_use]
    pub fn with_extra_timestamp(mut self, enabled: bool) -> Self {
        self.extra_timestamp = enabled;
        self
    }

    /// Limit the initial window to the last `count` lines
    #[must_use]
    pub fn with_count(mut self, count: Option<usize>) -> Self {
        self.count = count;
        self
    }

    /// Toggle follow mode
    #[must_use]
    pub fn with_follow(mut self, follow: bool) -> Self {
        self.follow = follow;
        self
    }

    /// Cap follow mode at `max_cycles` synthetic lines (0 = unlimited)
    #[must_use]
    pub fn with_max_cycles(mut self, max_cycles: u64) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    /// Set the pause between replayed lines
    #[must_use]
    pub fn with_line_delay(mut self, delay: Duration) -> Self {
        self.line_delay = delay;
        self
    }

    /// Set the pause between synthetic lines
    #[must_use]
    pub fn with_follow_interval(mut self, interval: Duration) -> Self {
        self.follow_interval = interval;
        self
    }

    /// Follow cycle cap, `None` when unbounded
    #[must_use]
    pub fn cycle_cap(&self) -> Option<u64> {
        (self.max_cycles > 0).then_some(self.max_cycles)
    }

    /// Index of the first line replayed in the initial window.
    ///
    /// Returns `total` (an empty window) when following without a count.
    #[must_use]
    pub fn initial_start(&self, total: usize) -> usize {
        if self.follow && self.count.is_none() {
            return total;
        }
        self.count.map_or(0, |n| total.saturating_sub(n))
    }
}
