//! logread-timeshift
//!
//! Rewrites a seeded log with a months-long clock skew before a random sync
//! point and prints it to stdout.

#![warn(missing_docs)]
#![warn(clippy::all)]

use clap::Parser;
use color_eyre::Result;
use logmock_cli::{telemetry, TimeshiftArgs};
use logmock_core::CoreError;
use logmock_replay::timeshift::{rewrite, TimeshiftPlan};
use logmock_replay::StreamWriter;
use tracing::info;

fn main() -> Result<()> {
    telemetry::init()?;
    let args = TimeshiftArgs::parse();

    let content = std::fs::read_to_string(&args.log_file)
        .map_err(|err| CoreError::io(&args.log_file, &err))?;
    let lines: Vec<String> = content.lines().map(str::to_owned).collect();

    let seed = args.seed.unwrap_or_else(rand::random);
    let plan = TimeshiftPlan::seeded(lines.len(), seed);
    info!(seed, sync_from = plan.sync_from, shift_back = plan.shift_back, "timeshift plan");

    let mut writer = StreamWriter::new(std::io::stdout().lock());
    rewrite(&lines, &plan, &mut writer)?;
    Ok(())
}
