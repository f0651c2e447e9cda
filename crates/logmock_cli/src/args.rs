//! Command-line arguments.

use clap::Parser;
use logmock_replay::ReplayConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Sample log, resolved against the working directory
pub const DEFAULT_LOG_FILE: &str = "data/default.log";

/// `logread` arguments, mirroring the OpenWrt tool's flags
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "logread")]
#[command(about = "OpenWrt logread imitator replaying a pre-seeded log", long_about = None)]
pub struct LogreadArgs {
    /// Local file with pre-seeded log to get entries from
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Add an extra timestamp
    #[arg(short = 't')]
    pub extra_timestamp: bool,

    /// Print only last <COUNT> messages
    #[arg(short = 'l', value_name = "COUNT")]
    pub count: Option<usize>,

    /// Follow log messages
    #[arg(short = 'f')]
    pub follow: bool,

    /// Stop following after this many synthetic lines (0 = never)
    #[arg(long, env = "LOGREAD_MAX_CYCLES", default_value_t = 0)]
    pub max_cycles: u64,

    /// Seconds to pause between replayed lines
    #[arg(long, value_name = "SECS", default_value = "0", value_parser = parse_seconds)]
    pub delay: Duration,

    /// Seconds to pause between synthetic lines
    #[arg(long, value_name = "SECS", default_value = "1", value_parser = parse_seconds)]
    pub follow_interval: Duration,
}

impl LogreadArgs {
    /// Replay configuration described by these arguments
    #[must_use]
    pub fn to_config(&self) -> ReplayConfig {
        ReplayConfig::default()
            .with_extra_timestamp(self.extra_timestamp)
            .with_count(self.count)
            .with_follow(self.follow)
            .with_max_cycles(self.max_cycles)
            .with_line_delay(self.delay)
            .with_follow_interval(self.follow_interval)
    }
}

/// `logread-timeshift` arguments
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "logread-timeshift")]
#[command(about = "Rewrite a seeded log with a clock skew before a random sync point", long_about = None)]
pub struct TimeshiftArgs {
    /// Local file with pre-seeded log to rewrite
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Seed for the sync point and shift (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

fn parse_seconds(raw: &str) -> Result<Duration, String> {
    let secs: f64 = raw
        .parse()
        .map_err(|_| format!("not a number of seconds: {raw}"))?;
    Duration::try_from_secs_f64(secs).map_err(|err| format!("invalid duration {raw}: {err}"))
}
