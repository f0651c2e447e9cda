//! Skewed log generation.
//!
//! Rewrites a seeded log so that everything before a randomly chosen line
//! appears to come from a device whose clock was months behind, the way a
//! router looks before NTP catches up. The result feeds reconciler tests.

use crate::output::StreamWriter;
use logmock_core::{format_calendar, reconcile, CoreResult, LogLine};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Write;
use tracing::debug;

/// Seconds per day
pub const DAY_SECS: f64 = 86_400.0;

/// Minimum shift applied to the unsynced prefix, in days
pub const BASE_SHIFT_DAYS: u32 = 180;

/// Where the clock jump happens and how big it is
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeshiftPlan {
    /// First line that keeps its original timestamp
    pub sync_from: usize,
    /// Seconds subtracted from every earlier line
    pub shift_back: f64,
}

impl TimeshiftPlan {
    /// Draw a plan for a log of `num_lines` lines.
    ///
    /// The sync point lands in the first half of the last third. Logs too
    /// short for that range sync at the start of the last third.
    pub fn random<R: Rng>(num_lines: usize, rng: &mut R) -> Self {
        let third = num_lines / 3;
        let low = third * 2;
        let high = low + third / 2;
        let sync_from = if high > low {
            rng.gen_range(low..high)
        } else {
            low
        };

        let extra_days = rng.gen_range(1..30u32);
        let shift_back = f64::from(BASE_SHIFT_DAYS + extra_days) * DAY_SECS;

        Self {
            sync_from,
            shift_back,
        }
    }

    /// Reproducible plan from a seed
    #[must_use]
    pub fn seeded(num_lines: usize, seed: u64) -> Self {
        Self::random(num_lines, &mut ChaCha8Rng::seed_from_u64(seed))
    }
}

/// Write `lines` with the prefix before `plan.sync_from` shifted back.
///
/// Shifted lines always get the bracketed field. The embedded timestamp is
/// preferred as the base; lines without one fall back to the reconciled value.
/// Returns the number of shifted lines.
///
/// # Errors
///
/// Returns error on a shifted line without any timestamp, or a failed write
pub fn rewrite<W: Write>(
    lines: &[String],
    plan: &TimeshiftPlan,
    writer: &mut StreamWriter<W>,
) -> CoreResult<u64> {
    debug!(
        sync_from = plan.sync_from,
        shift_back = plan.shift_back,
        lines = lines.len(),
        "rewriting log"
    );

    let mut shifted = 0;
    for (index, raw) in lines.iter().enumerate() {
        if index >= plan.sync_from {
            writer.write_line(raw)?;
            continue;
        }

        let line = LogLine::parse(raw);
        let base = match line.embedded_timestamp() {
            Some(ts) => ts,
            None => reconcile(&line, 0.0)?,
        };
        let ts = base - plan.shift_back;
        writer.write_line(&format!("{} [{ts:.3}] {}", format_calendar(ts)?, line.message()))?;
        shifted += 1;
    }
    Ok(shifted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use logmock_core::{reconcile_str, CoreError};

    const T0: f64 = 1_700_000_000.0;

    fn source(count: usize) -> Vec<String> {
        (0..count)
            .map(|i| {
                let ts = T0 + i as f64 * 10.0;
                format!(
                    "{} [{:.3}] daemon.info app: line {}",
                    format_calendar(ts).unwrap(),
                    ts,
                    i
                )
            })
            .collect()
    }

    #[test]
    fn test_plan_ranges() {
        for seed in 0..200 {
            let plan = TimeshiftPlan::seeded(30, seed);
            // third = 10, range [20, 25)
            assert!((20..25).contains(&plan.sync_from), "seed {seed}: {plan:?}");
            let days = plan.shift_back / DAY_SECS;
            assert!((181.0..=209.0).contains(&days), "seed {seed}: {days}");
            assert_eq!(days.fract(), 0.0);
        }
    }

    #[test]
    fn test_plan_is_reproducible() {
        assert_eq!(TimeshiftPlan::seeded(90, 7), TimeshiftPlan::seeded(90, 7));
    }

    #[test]
    fn test_plan_short_log() {
        let plan = TimeshiftPlan::seeded(4, 1);
        // third = 1, empty range collapses to 2
        assert_eq!(plan.sync_from, 2);
        assert_eq!(TimeshiftPlan::seeded(0, 1).sync_from, 0);
    }

    #[test]
    fn test_rewrite_shifts_prefix_only() {
        let lines = source(6);
        let plan = TimeshiftPlan {
            sync_from: 4,
            shift_back: 200.0 * DAY_SECS,
        };
        let mut writer = StreamWriter::new(Vec::new());
        let shifted = rewrite(&lines, &plan, &mut writer).unwrap();
        assert_eq!(shifted, 4);

        let out = String::from_utf8(writer.into_inner()).unwrap();
        let out: Vec<&str> = out.lines().collect();
        assert_eq!(out.len(), 6);

        for (i, line) in out.iter().enumerate().take(4) {
            let original = reconcile_str(&lines[i], 0.0).unwrap();
            let parsed = LogLine::parse(line);
            assert_eq!(parsed.embedded_timestamp(), Some(original - plan.shift_back));
            assert_eq!(parsed.message(), format!("daemon.info app: line {i}"));
        }
        assert_eq!(out[4], lines[4]);
        assert_eq!(out[5], lines[5]);
    }

    #[test]
    fn test_rewrite_plain_lines_gain_bracket() {
        let lines = vec![format!("{} kern.info kernel: boot", format_calendar(T0).unwrap())];
        let plan = TimeshiftPlan {
            sync_from: 1,
            shift_back: DAY_SECS,
        };
        let mut writer = StreamWriter::new(Vec::new());
        rewrite(&lines, &plan, &mut writer).unwrap();

        let out = String::from_utf8(writer.into_inner()).unwrap();
        let parsed = LogLine::parse(out.trim_end());
        assert_eq!(parsed.embedded_timestamp(), Some(T0 - DAY_SECS));
        assert_eq!(parsed.message(), "kern.info kernel: boot");
    }

    #[test]
    fn test_rewrite_invalid_prefix_line() {
        let lines = vec!["junk".to_string()];
        let plan = TimeshiftPlan {
            sync_from: 1,
            shift_back: DAY_SECS,
        };
        let mut writer = StreamWriter::new(Vec::new());
        let err = rewrite(&lines, &plan, &mut writer).unwrap_err();
        assert!(matches!(err, CoreError::InvalidLine { .. }));
    }
}
