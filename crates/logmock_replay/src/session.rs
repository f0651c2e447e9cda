//! Loaded replay session.

use crate::state::ReplayStateStore;
use logmock_core::{reconcile_str, CoreError, CoreResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source lines plus the time shift applied to them for one run
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySession {
    source_path: PathBuf,
    lines: Vec<String>,
    first_line_timestamp: f64,
    replay_start: f64,
    applied_delta: f64,
}

impl ReplaySession {
    /// Read the source log and its persisted baseline.
    ///
    /// The first line is validated before the state store is consulted, so a
    /// broken source never creates a sidecar.
    ///
    /// # Errors
    ///
    /// Returns error if the source is missing or empty, the first line has no
    /// parseable timestamp, or the state file is unusable
    pub fn load(source: impl AsRef<Path>) -> CoreResult<Self> {
        let source = source.as_ref();
        let content = fs::read_to_string(source).map_err(|err| CoreError::io(source, &err))?;
        let lines: Vec<String> = content.lines().map(str::to_owned).collect();

        let first_line_timestamp = first_timestamp(source, &lines)?;
        let replay_start = ReplayStateStore::for_source(source).load()?;
        Ok(Self::assemble(source.to_path_buf(), lines, first_line_timestamp, replay_start))
    }

    /// Build a session from lines already in memory.
    ///
    /// # Errors
    ///
    /// Returns error if `lines` is empty or its first line is invalid
    pub fn from_lines(
        source: impl Into<PathBuf>,
        lines: Vec<String>,
        replay_start: f64,
    ) -> CoreResult<Self> {
        let source_path = source.into();
        let first_line_timestamp = first_timestamp(&source_path, &lines)?;
        Ok(Self::assemble(source_path, lines, first_line_timestamp, replay_start))
    }

    fn assemble(
        source_path: PathBuf,
        lines: Vec<String>,
        first_line_timestamp: f64,
        replay_start: f64,
    ) -> Self {
        let applied_delta = replay_start - first_line_timestamp;

        debug!(
            source = %source_path.display(),
            lines = lines.len(),
            first_line_timestamp,
            replay_start,
            applied_delta,
            "loaded replay session"
        );

        Self {
            source_path,
            lines,
            first_line_timestamp,
            replay_start,
            applied_delta,
        }
    }

    /// Source log path
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Source lines in file order
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Last source line
    #[must_use]
    pub fn last_line(&self) -> &str {
        // from_lines guarantees at least one line
        self.lines.last().map_or("", String::as_str)
    }

    /// Reconciled timestamp of the first line, unshifted
    #[must_use]
    pub fn first_line_timestamp(&self) -> f64 {
        self.first_line_timestamp
    }

    /// Wall-clock instant the replay appears to start at
    #[must_use]
    pub fn replay_start(&self) -> f64 {
        self.replay_start
    }

    /// Shift added to every reconciled timestamp
    #[must_use]
    pub fn applied_delta(&self) -> f64 {
        self.applied_delta
    }
}

fn first_timestamp(source: &Path, lines: &[String]) -> CoreResult<f64> {
    let first = lines.first().ok_or_else(|| CoreError::EmptySource {
        path: source.display().to_string(),
    })?;
    reconcile_str(first, 0.0)
}
