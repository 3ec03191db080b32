//! Standard output sink

use crate::core::{LoggerError, Result, Sink};
use std::io::{IsTerminal, Write};

const TARGET: &str = "<stdout>";

/// Writes each record as one line to standard output
///
/// The line and its newline go out in a single `write_all` under the stdout
/// lock, then stdout is flushed.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for StdoutSink {
    fn write_line(&self, line: &str) -> Result<()> {
        let mut buffer = String::with_capacity(line.len() + 1);
        buffer.push_str(line);
        buffer.push('\n');

        let mut out = std::io::stdout().lock();
        out.write_all(buffer.as_bytes())
            .map_err(|e| LoggerError::sink_io(TARGET, "writing record", e))?;
        out.flush()
            .map_err(|e| LoggerError::sink_io(TARGET, "flushing", e))
    }

    fn flush(&self) -> Result<()> {
        std::io::stdout()
            .flush()
            .map_err(|e| LoggerError::sink_io(TARGET, "flushing", e))
    }

    fn name(&self) -> &str {
        "stdout"
    }

    fn is_terminal(&self) -> bool {
        std::io::stdout().is_terminal()
    }
}
