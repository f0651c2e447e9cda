//! Calendar time helpers.
//!
//! Log lines carry a 24-character `Day Mon DD HH:MM:SS YYYY` prefix in the
//! local timezone of whoever reads them. These helpers convert between that
//! prefix and Unix seconds.

use crate::error::{CoreError, CoreResult};
use chrono::{Local, NaiveDateTime, TimeZone, Utc, Weekday};

/// Calendar prefix layout, identical to `ctime(3)` minus the newline
pub const CALENDAR_FORMAT: &str = "%a %b %d %H:%M:%S %Y";

/// Width of the calendar prefix in characters
pub const CALENDAR_WIDTH: usize = 24;

// The weekday is checked for spelling only, the date fields decide the instant.
const DATE_FORMAT: &str = "%b %d %H:%M:%S %Y";

/// Parse a calendar prefix as local time into Unix seconds.
///
/// Ambiguous local times (DST fall-back) resolve to the earliest instant.
/// Local times that do not exist (DST spring-forward gap) yield `None`.
#[must_use]
pub fn parse_calendar(text: &str) -> Option<f64> {
    let (weekday, rest) = text.split_once(' ')?;
    weekday.parse::<Weekday>().ok()?;
    let naive = NaiveDateTime::parse_from_str(rest.trim_start(), DATE_FORMAT).ok()?;
    let local = Local.from_local_datetime(&naive).earliest()?;
    Some(local.timestamp() as f64)
}

/// Format Unix seconds as a local calendar prefix.
///
/// Fractional seconds are truncated toward zero.
///
/// # Errors
///
/// Returns `InvalidTimestamp` for non-finite or out-of-range values.
pub fn format_calendar(ts: f64) -> CoreResult<String> {
    let invalid = || CoreError::InvalidTimestamp {
        value: ts.to_string(),
    };

    if !ts.is_finite() || ts.abs() >= i64::MAX as f64 {
        return Err(invalid());
    }

    let local = Local
        .timestamp_opt(ts.trunc() as i64, 0)
        .single()
        .ok_or_else(invalid)?;
    Ok(local.format(CALENDAR_FORMAT).to_string())
}

/// Current wall-clock time as fractional Unix seconds
#[must_use]
pub fn unix_now() -> f64 {
    let now = Utc::now();
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_micros()) / 1_000_000.0
}
