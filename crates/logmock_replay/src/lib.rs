//! logread-mock Replay Engine
//!
//! Replays a pre-seeded router log with its timestamps moved onto the
//! present, then optionally keeps fabricating lines to imitate `logread -f`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod engine;
pub mod follow;
pub mod output;
pub mod session;
pub mod state;
pub mod timeshift;

pub use config::ReplayConfig;
pub use engine::{DriverPhase, ReplayDriver, RunSummary};
pub use follow::{FollowStream, SyntheticLine};
pub use output::{format_line, StreamWriter, MOCK_MARKER};
pub use session::ReplaySession;
pub use state::{ReplayStateStore, StateError, StateResult};
pub use timeshift::TimeshiftPlan;
