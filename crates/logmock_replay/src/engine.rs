//! Replay driver: initial emission followed by optional follow mode.

use crate::config::ReplayConfig;
use crate::follow::FollowStream;
use crate::output::{format_line, StreamWriter};
use crate::session::ReplaySession;
use logmock_core::{reconcile, CoreResult, LogLine};
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Driver lifecycle.
///
/// A driver only exists once its session is loaded, so it starts in `Loaded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    /// Session loaded, nothing emitted
    Loaded,
    /// Replaying source lines
    EmittingInitial,
    /// Fabricating synthetic lines
    Following,
    /// Run finished, interrupted, or failed
    Terminated,
}

/// What a run produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Source lines replayed
    pub initial_lines: u64,
    /// Synthetic lines produced in follow mode
    pub synthetic_lines: u64,
    /// Run stopped on cancellation rather than running out of work
    pub interrupted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Interrupted,
}

/// Replays a session to a writer
pub struct ReplayDriver {
    session: ReplaySession,
    config: ReplayConfig,
    phase: DriverPhase,
}

impl ReplayDriver {
    /// Create a driver over a loaded session
    #[must_use]
    pub fn new(session: ReplaySession, config: ReplayConfig) -> Self {
        Self {
            session,
            config,
            phase: DriverPhase::Loaded,
        }
    }

    /// Load `source` and create a driver for it
    ///
    /// # Errors
    ///
    /// Returns error if the session cannot be loaded
    pub fn load(source: impl AsRef<Path>, config: ReplayConfig) -> CoreResult<Self> {
        Ok(Self::new(ReplaySession::load(source)?, config))
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    /// Session being replayed
    #[must_use]
    pub fn session(&self) -> &ReplaySession {
        &self.session
    }

    /// Active configuration
    #[must_use]
    pub fn config(&self) -> &ReplayConfig {
        &self.config
    }

    /// Synthetic line source positioned after the last real line.
    ///
    /// # Errors
    ///
    /// Returns error if the last line has no parseable timestamp
    pub fn follow_stream(&self) -> CoreResult<FollowStream> {
        let last = LogLine::parse(self.session.last_line());
        let cursor = reconcile(&last, self.session.applied_delta())?;
        Ok(FollowStream::new(last.message(), cursor).with_cap(self.config.cycle_cap()))
    }

    /// Run to completion or until `cancel` fires.
    ///
    /// Cancellation is a normal outcome and is reported through
    /// [`RunSummary::interrupted`].
    ///
    /// # Errors
    ///
    /// Returns error on an invalid source line or a failed write
    pub async fn run<W: Write>(
        &mut self,
        out: W,
        cancel: &CancellationToken,
    ) -> CoreResult<RunSummary> {
        let mut writer = StreamWriter::new(out);
        let mut summary = RunSummary::default();

        let result = self.drive(&mut writer, cancel, &mut summary).await;
        self.transition(DriverPhase::Terminated);

        result?;
        info!(
            initial = summary.initial_lines,
            synthetic = summary.synthetic_lines,
            interrupted = summary.interrupted,
            "replay finished"
        );
        Ok(summary)
    }

    async fn drive<W: Write>(
        &mut self,
        writer: &mut StreamWriter<W>,
        cancel: &CancellationToken,
        summary: &mut RunSummary,
    ) -> CoreResult<()> {
        self.transition(DriverPhase::EmittingInitial);
        if self.emit_initial(writer, cancel, summary).await? == Flow::Interrupted {
            summary.interrupted = true;
            return Ok(());
        }

        if self.config.follow {
            self.transition(DriverPhase::Following);
            if self.follow(writer, cancel, summary).await? == Flow::Interrupted {
                summary.interrupted = true;
            }
        }
        Ok(())
    }

    async fn emit_initial<W: Write>(
        &self,
        writer: &mut StreamWriter<W>,
        cancel: &CancellationToken,
        summary: &mut RunSummary,
    ) -> CoreResult<Flow> {
        let lines = self.session.lines();
        let start = self.config.initial_start(lines.len());
        let delta = self.session.applied_delta();

        for raw in &lines[start..] {
            if cancel.is_cancelled() {
                return Ok(Flow::Interrupted);
            }

            let line = LogLine::parse(raw);
            let ts = reconcile(&line, delta)?;
            writer.write_line(&format_line(ts, line.message(), self.config.extra_timestamp)?)?;
            summary.initial_lines += 1;

            if pause(self.config.line_delay, cancel).await == Flow::Interrupted {
                return Ok(Flow::Interrupted);
            }
        }
        Ok(Flow::Continue)
    }

    async fn follow<W: Write>(
        &self,
        writer: &mut StreamWriter<W>,
        cancel: &CancellationToken,
        summary: &mut RunSummary,
    ) -> CoreResult<Flow> {
        let mut stream = self.follow_stream()?;
        debug!(cursor = stream.cursor(), cap = ?self.config.cycle_cap(), "entering follow mode");

        while !cancel.is_cancelled() {
            let Some(synthetic) = stream.next() else {
                return Ok(Flow::Continue);
            };

            writer.write_line(&format_line(
                synthetic.timestamp,
                &synthetic.message,
                self.config.extra_timestamp,
            )?)?;
            summary.synthetic_lines += 1;

            // no trailing pause once the cap is reached
            if stream.size_hint().1 == Some(0) {
                return Ok(Flow::Continue);
            }
            if pause(self.config.follow_interval, cancel).await == Flow::Interrupted {
                return Ok(Flow::Interrupted);
            }
        }
        Ok(Flow::Interrupted)
    }

    fn transition(&mut self, next: DriverPhase) {
        debug!(from = ?self.phase, to = ?next, "driver phase");
        self.phase = next;
    }
}

/// Sleep for `delay` unless cancelled first.
///
/// A zero delay still yields once so a signal listener on the same runtime
/// gets a chance to cancel.
async fn pause(delay: Duration, cancel: &CancellationToken) -> Flow {
    if delay.is_zero() {
        tokio::task::yield_now().await;
        return if cancel.is_cancelled() {
            Flow::Interrupted
        } else {
            Flow::Continue
        };
    }

    tokio::select! {
        () = cancel.cancelled() => Flow::Interrupted,
        () = tokio::time::sleep(delay) => Flow::Continue,
    }
}
