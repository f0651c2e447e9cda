//! logread-mock CLI support
//!
//! Argument definitions and logging setup shared by the `logread` and
//! `logread-timeshift` binaries.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod args;
pub mod telemetry;

pub use args::{LogreadArgs, TimeshiftArgs, DEFAULT_LOG_FILE};
