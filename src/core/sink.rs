//! Sink trait for rendered log lines

use super::error::Result;

/// Destination for rendered lines
///
/// Implementations are shared across threads and must write each line with a
/// single write so concurrent records never interleave.
pub trait Sink: Send + Sync {
    /// Write one rendered record; the sink appends the newline
    fn write_line(&self, line: &str) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;

    /// Whether the destination is an interactive terminal
    fn is_terminal(&self) -> bool {
        false
    }
}
