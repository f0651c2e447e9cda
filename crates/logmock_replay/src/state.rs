//! Replay baseline persisted next to the source log.
//!
//! The sidecar `<source>.state` holds a single Unix timestamp: the wall-clock
//! instant the replayed history should appear to start at. Keeping it across
//! runs means a second invocation continues the same fake timeline instead of
//! jumping back to "an hour ago".
//!
//! There is no locking. Two first runs racing on the same source may write
//! different baselines; the last writer wins.

use logmock_core::{unix_now, CoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Suffix appended to the source path
pub const STATE_SUFFIX: &str = ".state";

/// How far before "now" a fresh baseline starts, in seconds
pub const DEFAULT_LOOKBACK_SECS: f64 = 3600.0;

/// State store result type
pub type StateResult<T> = Result<T, StateError>;

/// State store errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Reading or writing the sidecar failed
    #[error("IO error on {path}: {reason}")]
    Io {
        /// Sidecar path
        path: String,
        /// Underlying error message
        reason: String,
    },
    /// Sidecar content is not a number
    #[error("corrupt state file {path}: {content:?}")]
    Corrupt {
        /// Sidecar path
        path: String,
        /// Raw content
        content: String,
    },
}

impl From<StateError> for CoreError {
    fn from(err: StateError) -> Self {
        match err {
            StateError::Io { path, reason } => CoreError::Io { path, reason },
            StateError::Corrupt { path, content } => CoreError::CorruptState { path, content },
        }
    }
}

/// Sidecar file holding the replay start timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayStateStore {
    path: PathBuf,
}

impl ReplayStateStore {
    /// Store for the given source log
    #[must_use]
    pub fn for_source(source: impl AsRef<Path>) -> Self {
        let mut path = source.as_ref().as_os_str().to_owned();
        path.push(STATE_SUFFIX);
        Self {
            path: PathBuf::from(path),
        }
    }

    /// Sidecar path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored baseline, `None` if no sidecar exists yet.
    ///
    /// # Errors
    ///
    /// Returns error if the file is unreadable or not a number
    pub fn read(&self) -> StateResult<Option<f64>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(self.io_error(&err)),
        };

        let value = content
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| StateError::Corrupt {
                path: self.display(),
                content: content.clone(),
            })?;

        debug!(path = %self.path.display(), replay_start = value, "loaded replay state");
        Ok(Some(value))
    }

    /// Write a fresh baseline one hour before `now` and return it.
    ///
    /// # Errors
    ///
    /// Returns error if the sidecar cannot be written
    pub fn initialize_at(&self, now: f64) -> StateResult<f64> {
        let value = now - DEFAULT_LOOKBACK_SECS;
        fs::write(&self.path, format!("{value}\n")).map_err(|err| self.io_error(&err))?;
        debug!(path = %self.path.display(), replay_start = value, "initialized replay state");
        Ok(value)
    }

    /// Write a fresh baseline one hour before the current time.
    ///
    /// # Errors
    ///
    /// Returns error if the sidecar cannot be written
    pub fn initialize(&self) -> StateResult<f64> {
        self.initialize_at(unix_now())
    }

    /// Stored baseline, initializing the sidecar on first use.
    ///
    /// # Errors
    ///
    /// Returns error if the sidecar is unreadable, corrupt, or cannot be created
    pub fn load(&self) -> StateResult<f64> {
        match self.read()? {
            Some(value) => Ok(value),
            None => self.initialize(),
        }
    }

    fn display(&self) -> String {
        self.path.display().to_string()
    }

    fn io_error(&self, err: &std::io::Error) -> StateError {
        StateError::Io {
            path: self.display(),
            reason: err.to_string(),
        }
    }
}
