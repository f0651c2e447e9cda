//! Timestamp reconciliation.
//!
//! Every line may carry two clocks: the embedded high-precision field, written
//! in the origin's timezone, and the calendar prefix, which we re-read in the
//! local timezone. When they agree within a second the later one wins. When
//! they disagree the gap is taken to be a timezone offset, rounded to ten
//! seconds, and the embedded value is moved across it.
//!
//! The ten-second rounding only recovers real zone offsets. Plain clock drift
//! that is not close to a multiple of ten comes out wrong, and callers rely on
//! exactly that behaviour, so it stays.

use crate::error::{CoreError, CoreResult};
use crate::line::LogLine;

/// Skews below this are sub-second noise, not a timezone difference
const SYNC_TOLERANCE: f64 = 1.0;

/// Granularity of the timezone skew correction, in seconds
const SKEW_GRANULARITY: f64 = 10.0;

/// Compute the canonical timestamp of a line plus `extra_delta`.
///
/// # Errors
///
/// Returns `InvalidLine` when neither timestamp could be parsed.
pub fn reconcile(line: &LogLine<'_>, extra_delta: f64) -> CoreResult<f64> {
    let base = match (line.embedded_timestamp(), line.constructed_timestamp()) {
        (None, None) => {
            return Err(CoreError::InvalidLine {
                line: line.raw().to_string(),
            });
        }
        (None, Some(constructed)) => constructed,
        (Some(embedded), None) => embedded,
        (Some(embedded), Some(constructed)) => correct_skew(embedded, constructed),
    };
    Ok(base + extra_delta)
}

/// Parse and reconcile in one step.
///
/// # Errors
///
/// Returns `InvalidLine` when neither timestamp could be parsed.
pub fn reconcile_str(raw: &str, extra_delta: f64) -> CoreResult<f64> {
    reconcile(&LogLine::parse(raw), extra_delta)
}

fn correct_skew(embedded: f64, constructed: f64) -> f64 {
    let abs_delta = (embedded - constructed).abs();
    if abs_delta < SYNC_TOLERANCE {
        return embedded.max(constructed);
    }

    let rounded = (abs_delta / SKEW_GRANULARITY).round_ties_even() * SKEW_GRANULARITY;
    if embedded > constructed {
        embedded - rounded
    } else {
        embedded + rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::format_calendar;

    const X: f64 = 1_700_000_000.0;

    /// Line whose calendar prefix reads back as `calendar` and whose
    /// bracketed field holds `embedded`.
    fn line_with(calendar: f64, embedded: f64) -> String {
        format!(
            "{} [{:.3}] daemon.info test: hello",
            format_calendar(calendar).unwrap(),
            embedded
        )
    }

    #[test]
    fn test_invalid_line() {
        let err = reconcile_str("", 0.0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidLine { .. }));
    }

    #[test]
    fn test_calendar_only() {
        let raw = format!("{} kern.info kernel: boot", format_calendar(X).unwrap());
        assert_eq!(reconcile_str(&raw, 5.0).unwrap(), X + 5.0);
    }

    #[test]
    fn test_embedded_only() {
        let raw = format!("{:<24} [{:.3}] msg", "???", X + 0.5);
        assert_eq!(reconcile_str(&raw, 0.0).unwrap(), X + 0.5);
    }

    #[test]
    fn test_in_sync_takes_max() {
        let raw = line_with(X, X + 0.75);
        assert_eq!(reconcile_str(&raw, 0.0).unwrap(), X + 0.75);
        assert_eq!(reconcile_str(&raw, 3600.0).unwrap(), X + 0.75 + 3600.0);
    }

    #[test]
    fn test_exact_one_second_is_skew() {
        // |delta| == 1.0 is not in sync; rounds to 0
        let raw = line_with(X + 1.0, X);
        assert_eq!(reconcile_str(&raw, 0.0).unwrap(), X);
    }

    #[test]
    fn test_half_hour_skew_toward_constructed() {
        // embedded X, calendar X + 1830
        let raw = line_with(X + 1830.0, X);
        assert_eq!(reconcile_str(&raw, 0.0).unwrap(), X + 1830.0);
        assert_eq!(reconcile_str(&raw, 100.0).unwrap(), X + 1930.0);
    }

    #[test]
    fn test_half_hour_skew_embedded_ahead() {
        let raw = line_with(X, X + 1830.0);
        assert_eq!(reconcile_str(&raw, 0.0).unwrap(), X);
    }

    #[test]
    fn test_skew_rounds_to_ten() {
        // 3604 rounds to 3600
        let raw = line_with(X, X + 3604.0);
        assert_eq!(reconcile_str(&raw, 0.0).unwrap(), X + 4.0);

        // 3606 rounds to 3610
        let raw = line_with(X, X + 3606.0);
        assert_eq!(reconcile_str(&raw, 0.0).unwrap(), X - 4.0);
    }

    #[test]
    fn test_skew_ties_round_to_even() {
        assert_eq!(correct_skew(X + 25.0, X), X + 5.0);
        assert_eq!(correct_skew(X + 35.0, X), X - 5.0);
        assert_eq!(correct_skew(X, X + 15.0), X + 20.0);
    }

    proptest::proptest! {
        #[test]
        fn prop_in_sync_returns_max(
            constructed in 0i64..4_000_000_000,
            offset in -0.999f64..0.999,
            delta in -100_000.0f64..100_000.0
        ) {
            let c = constructed as f64;
            let e = c + offset;
            let line = LogLine::from_parts("", Some(e), Some(c), "");
            proptest::prop_assert_eq!(reconcile(&line, delta).unwrap(), e.max(c) + delta);
        }

        #[test]
        fn prop_skew_moves_toward_constructed(
            constructed in 0i64..4_000_000_000,
            skew in 1.5f64..200_000.0,
            ahead in proptest::bool::ANY
        ) {
            let c = constructed as f64;
            let e = if ahead { c + skew } else { c - skew };
            let line = LogLine::from_parts("", Some(e), Some(c), "");
            let abs = (e - c).abs();
            let rounded = (abs / 10.0).round_ties_even() * 10.0;
            let expected = if ahead { e - rounded } else { e + rounded };
            let got = reconcile(&line, 0.0).unwrap();
            proptest::prop_assert_eq!(got, expected);
            // never further than five seconds from the calendar value
            proptest::prop_assert!((got - c).abs() <= 5.0 + 1e-6);
        }
    }
}
