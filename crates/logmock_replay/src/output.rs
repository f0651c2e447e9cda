//! Output line formatting and the flushing writer.

use logmock_core::{format_calendar, CoreError, CoreResult};
use std::io::Write;

/// Marker appended to synthetic follow-mode messages
pub const MOCK_MARKER: &str = "(MOCK)";

/// Render one output line, without terminator.
///
/// # Errors
///
/// Returns error if `ts` cannot be shown as a calendar time
pub fn format_line(ts: f64, message: &str, extra_timestamp: bool) -> CoreResult<String> {
    let calendar = format_calendar(ts)?;
    Ok(if extra_timestamp {
        format!("{calendar} [{ts:.3}] {message}")
    } else {
        format!("{calendar} {message}")
    })
}

/// Tag a message as synthetic
#[must_use]
pub fn mock_message(message: &str) -> String {
    if message.is_empty() {
        MOCK_MARKER.to_string()
    } else {
        format!("{message} {MOCK_MARKER}")
    }
}

/// Line writer that flushes after every line, so tailing consumers see each
/// line as soon as it is produced.
pub struct StreamWriter<W: Write> {
    inner: W,
    written: u64,
}

impl<W: Write> StreamWriter<W> {
    /// Wrap a writer
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Write `line` plus a newline and flush.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying writer fails
    pub fn write_line(&mut self, line: &str) -> CoreResult<()> {
        writeln!(self.inner, "{line}")
            .and_then(|()| self.inner.flush())
            .map_err(|err| CoreError::io("<output>", &err))?;
        self.written += 1;
        Ok(())
    }

    /// Lines written so far
    #[must_use]
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Unwrap the inner writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}
