//! Core error types for logread-mock.

/// Core result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Core error type
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Neither the embedded nor the calendar timestamp could be parsed
    #[error("invalid log line: \"{line}\"")]
    InvalidLine {
        /// Offending line, terminator stripped
        line: String,
    },

    /// Filesystem failure
    #[error("IO error on {path}: {reason}")]
    Io {
        /// Path involved
        path: String,
        /// Underlying error message
        reason: String,
    },

    /// Source log has no lines
    #[error("source log is empty: {path}")]
    EmptySource {
        /// Source path
        path: String,
    },

    /// Sidecar state file holds something other than a number
    #[error("corrupt replay state in {path}: {content:?}")]
    CorruptState {
        /// State file path
        path: String,
        /// Raw file content
        content: String,
    },

    /// Timestamp cannot be represented as a local calendar time
    #[error("invalid timestamp: {value}")]
    InvalidTimestamp {
        /// Offending value, as text
        value: String,
    },
}

impl CoreError {
    /// Build an `Io` error from a path and a `std::io::Error`
    #[must_use]
    pub fn io(path: impl AsRef<std::path::Path>, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().display().to_string(),
            reason: err.to_string(),
        }
    }
}
