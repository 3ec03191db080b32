//! Bridge from the `log` crate facade into the factory's pipeline
//!
//! Libraries that log through `log::info!` and friends end up in the same
//! output as handles issued by the factory. The record target becomes the
//! logger name.

use crate::core::{Fields, LogLevel, LoggerError, LoggerFactory, Result};

/// `log::Log` implementation forwarding to a [`LoggerFactory`]
pub struct LogBridge {
    factory: &'static LoggerFactory,
}

impl LogBridge {
    pub fn new(factory: &'static LoggerFactory) -> Self {
        Self { factory }
    }

    /// Severity used for a `log` level; `trace` maps to debug
    pub fn map_level(level: log::Level) -> LogLevel {
        match level {
            log::Level::Error => LogLevel::Error,
            log::Level::Warn => LogLevel::Warning,
            log::Level::Info => LogLevel::Info,
            log::Level::Debug | log::Level::Trace => LogLevel::Debug,
        }
    }

    fn logger_for(&self, target: &str) -> Result<crate::core::Logger> {
        if target.is_empty() {
            self.factory.get_default_logger()
        } else {
            self.factory.get_logger(Some(target))
        }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.logger_for(metadata.target())
            .map(|logger| logger.is_enabled(Self::map_level(metadata.level())))
            .unwrap_or(false)
    }

    fn log(&self, record: &log::Record<'_>) {
        let level = Self::map_level(record.level());
        let event = record.args().to_string();
        let result = self
            .logger_for(record.target())
            .and_then(|logger| logger.emit(level, &event, Fields::new(), None));
        if let Err(e) = result {
            eprintln!("[LOGGER ERROR] Failed to forward log record: {}", e);
        }
    }

    fn flush(&self) {
        if let Err(e) = self.factory.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush: {}", e);
        }
    }
}

/// Route the `log` facade into `factory`
///
/// Fails if another `log` implementation is already installed.
pub fn install_log_bridge(factory: &'static LoggerFactory) -> Result<()> {
    log::set_boxed_logger(Box::new(LogBridge::new(factory))).map_err(|_| {
        LoggerError::invalid_argument("logger", "a log facade logger is already installed")
    })?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
