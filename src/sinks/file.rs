//! File sink implementation

use crate::core::{LoggerError, Result, Sink};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends records to a file opened once for the sink's lifetime
///
/// Writes are serialized by a mutex and flushed per record, so every line is
/// on disk when the logging call returns. The file is closed on [`close`]
/// or drop.
///
/// [`close`]: FileSink::close
pub struct FileSink {
    path: PathBuf,
    display: String,
    writer: Mutex<Option<BufWriter<File>>>,
}

impl FileSink {
    /// Open `path` in append mode, creating it and missing parent directories
    ///
    /// Fails when the path is a directory or exists but is not a regular file.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let display = path.display().to_string();

        if path.is_dir() {
            return Err(LoggerError::sink_io(
                &display,
                "opening log file",
                io::Error::new(io::ErrorKind::InvalidInput, "path is a directory, not a file"),
            ));
        }
        if path.exists() && !path.is_file() {
            return Err(LoggerError::sink_io(
                &display,
                "opening log file",
                io::Error::new(io::ErrorKind::InvalidInput, "path exists but is not a regular file"),
            ));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| LoggerError::sink_io(&display, "creating parent directories", e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::sink_io(&display, "opening log file", e))?;

        Ok(Self {
            path,
            display,
            writer: Mutex::new(Some(BufWriter::new(file))),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.writer.lock().is_some()
    }

    /// Flush and close the file; later writes fail
    pub fn close(&self) -> Result<()> {
        match self.writer.lock().take() {
            Some(mut writer) => writer
                .flush()
                .map_err(|e| LoggerError::sink_io(&self.display, "closing log file", e)),
            None => Ok(()),
        }
    }
}

impl Sink for FileSink {
    fn write_line(&self, line: &str) -> Result<()> {
        let mut guard = self.writer.lock();
        let writer = guard.as_mut().ok_or_else(|| {
            LoggerError::sink_io(
                &self.display,
                "writing record",
                io::Error::new(io::ErrorKind::BrokenPipe, "log file already closed"),
            )
        })?;

        let mut buffer = String::with_capacity(line.len() + 1);
        buffer.push_str(line);
        buffer.push('\n');

        writer
            .write_all(buffer.as_bytes())
            .and_then(|()| writer.flush())
            .map_err(|e| LoggerError::sink_io(&self.display, "writing record", e))
    }

    fn flush(&self) -> Result<()> {
        if let Some(writer) = self.writer.lock().as_mut() {
            writer
                .flush()
                .map_err(|e| LoggerError::sink_io(&self.display, "flushing", e))?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            eprintln!("[LOGGER ERROR] Failed to close log file: {}", e);
        }
    }
}
