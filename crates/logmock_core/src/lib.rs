//! logread-mock Core Types
//!
//! Pure parsing and timestamp logic shared by the replay engine.
//! Nothing in this crate touches the filesystem.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod line;
pub mod reconcile;
pub mod time;

// Re-exports
pub use error::{CoreError, CoreResult};
pub use line::LogLine;
pub use reconcile::{reconcile, reconcile_str};
pub use time::{format_calendar, parse_calendar, unix_now, CALENDAR_FORMAT, CALENDAR_WIDTH};
