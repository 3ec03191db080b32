//! Logger factory owning the active configuration and pipeline
//!
//! A [`LoggerFactory`] holds at most one configuration and the pipeline
//! compiled from it. Handles issued by the factory look the pipeline up on
//! every record, so `configure` and `reset` are observed by handles issued
//! earlier.
//!
//! `configure`, `reset` and the lazy configuration done on first use are
//! serialized by one lock. Emitting a record holds the read side of that lock
//! for the duration of the record, so a reconfiguration waits for in-flight
//! records to finish on the old pipeline before swapping it out.

use super::config::{resolve, LoggingConfig};
use super::error::{LoggerError, Result};
use super::log_context::Fields;
use super::logger::{Logger, LoggerName};
use super::pipeline::Pipeline;
use super::source::{ConfigSource, EnvSource};
use parking_lot::{RwLock, RwLockReadGuard, RwLockUpgradableReadGuard, RwLockWriteGuard};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

#[derive(Default)]
pub(crate) struct FactoryState {
    pub(crate) config: Option<LoggingConfig>,
    pub(crate) pipeline: Option<Pipeline>,
}

pub(crate) struct FactoryShared {
    state: RwLock<FactoryState>,
    source: Box<dyn ConfigSource>,
}

impl FactoryShared {
    /// Read access to a configured state, configuring from the source first
    /// if nothing is active
    pub(crate) fn read_configured(&self) -> Result<RwLockReadGuard<'_, FactoryState>> {
        let state = self.state.read();
        if state.pipeline.is_some() {
            return Ok(state);
        }
        drop(state);

        let state = self.state.upgradable_read();
        if state.pipeline.is_some() {
            return Ok(RwLockUpgradableReadGuard::downgrade(state));
        }
        let mut state = RwLockUpgradableReadGuard::upgrade(state);
        self.install(&mut state, None, None)?;
        Ok(RwLockWriteGuard::downgrade(state))
    }

    pub(crate) fn configured_logger_name(&self) -> Option<String> {
        self.state
            .read()
            .config
            .as_ref()
            .map(|config| config.logger_name().to_string())
    }

    fn install(
        &self,
        state: &mut FactoryState,
        config: Option<LoggingConfig>,
        mapping: Option<&HashMap<String, String>>,
    ) -> Result<()> {
        let config = match (config, mapping) {
            (Some(config), _) => config,
            (None, Some(mapping)) => resolve(mapping)?,
            (None, None) => resolve(&self.source.load()?)?,
        };
        let pipeline = Pipeline::build(&config)?;
        self.swap(state, pipeline);
        Ok(())
    }

    fn swap(&self, state: &mut FactoryState, pipeline: Pipeline) {
        let previous = state.pipeline.replace(pipeline);
        state.config = state.pipeline.as_ref().map(|p| p.config().clone());
        if let Some(previous) = previous {
            if let Err(e) = previous.flush() {
                eprintln!("[LOGGER WARNING] Failed to flush replaced pipeline: {}", e);
            }
        }
    }
}

/// Thread-safe factory for configuring the pipeline and issuing loggers
///
/// # Example
///
/// ```no_run
/// use std::collections::HashMap;
/// use structured_logs::{Fields, LoggerFactory};
///
/// let factory = LoggerFactory::new();
/// let mapping: HashMap<String, String> = [
///     ("LOGGING_LEVEL", "INFO"),
///     ("LOGGING_FORMAT", "json"),
/// ]
/// .into_iter()
/// .map(|(k, v)| (k.to_string(), v.to_string()))
/// .collect();
/// factory.configure(None, Some(&mapping))?;
///
/// let logger = factory.get_logger(None)?;
/// logger.info_with("started", Fields::new().with("version", "1.0.0"))?;
/// # Ok::<(), structured_logs::LoggerError>(())
/// ```
pub struct LoggerFactory {
    shared: Arc<FactoryShared>,
}

impl LoggerFactory {
    /// Factory resolving its default configuration from [`EnvSource`]
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(EnvSource::new())
    }

    /// Factory resolving its default configuration from `source`
    #[must_use]
    pub fn with_source<S: ConfigSource + 'static>(source: S) -> Self {
        Self {
            shared: Arc::new(FactoryShared {
                state: RwLock::new(FactoryState::default()),
                source: Box::new(source),
            }),
        }
    }

    /// Process-wide default instance
    pub fn global() -> &'static LoggerFactory {
        static GLOBAL: OnceLock<LoggerFactory> = OnceLock::new();
        GLOBAL.get_or_init(LoggerFactory::new)
    }

    /// Configure from `config`, else from `mapping`, else from the source
    ///
    /// Replaces any active configuration and pipeline. On error the previous
    /// pipeline stays active.
    pub fn configure(
        &self,
        config: Option<LoggingConfig>,
        mapping: Option<&HashMap<String, String>>,
    ) -> Result<()> {
        let mut state = self.shared.state.write();
        self.shared.install(&mut state, config, mapping)
    }

    /// Configure with an already validated configuration
    pub fn configure_with(&self, config: LoggingConfig) -> Result<()> {
        self.configure(Some(config), None)
    }

    /// Install a prebuilt pipeline, e.g. one with a custom sink
    pub fn install_pipeline(&self, pipeline: Pipeline) {
        let mut state = self.shared.state.write();
        self.shared.swap(&mut state, pipeline);
    }

    /// Drop the active configuration and pipeline, closing any log file
    pub fn reset(&self) {
        let mut state = self.shared.state.write();
        state.config = None;
        if let Some(pipeline) = state.pipeline.take() {
            if let Err(e) = pipeline.flush() {
                eprintln!("[LOGGER WARNING] Failed to flush pipeline during reset: {}", e);
            }
        }
    }

    /// Active configuration, if any
    pub fn get_config(&self) -> Option<LoggingConfig> {
        self.shared.state.read().config.clone()
    }

    pub fn is_configured(&self) -> bool {
        self.shared.state.read().config.is_some()
    }

    /// Flush the active sink
    pub fn flush(&self) -> Result<()> {
        match &self.shared.state.read().pipeline {
            Some(pipeline) => pipeline.flush(),
            None => Ok(()),
        }
    }

    fn issue(&self, name: LoggerName, bound: Fields) -> Result<Logger> {
        drop(self.shared.read_configured()?);
        Ok(Logger::new(Arc::downgrade(&self.shared), name, bound))
    }

    /// Logger named after the configured `logger_name`
    pub fn get_default_logger(&self) -> Result<Logger> {
        self.issue(LoggerName::Default, Fields::new())
    }

    /// Logger named `name`, or the configured `logger_name` when `None`
    pub fn get_logger(&self, name: Option<&str>) -> Result<Logger> {
        match name {
            None => self.get_default_logger(),
            Some("") => Err(LoggerError::invalid_argument(
                "name",
                "logger name must not be empty",
            )),
            Some(name) => self.issue(LoggerName::Named(name.to_string()), Fields::new()),
        }
    }

    /// Default-named logger whose records all carry `handler=<handler_name>`
    pub fn get_handler_logger(&self, handler_name: &str) -> Result<Logger> {
        if handler_name.is_empty() {
            return Err(LoggerError::invalid_argument(
                "handler_name",
                "handler name must not be empty",
            ));
        }
        self.issue(
            LoggerName::Default,
            Fields::new().with("handler", handler_name),
        )
    }
}

impl Default for LoggerFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// [`LoggerFactory::get_logger`] on the global factory
pub fn get_logger(name: Option<&str>) -> Result<Logger> {
    LoggerFactory::global().get_logger(name)
}

/// [`LoggerFactory::get_handler_logger`] on the global factory
pub fn get_handler_logger(handler_name: &str) -> Result<Logger> {
    LoggerFactory::global().get_handler_logger(handler_name)
}

/// Named logger for code migrating from another logging facade
///
/// The returned handle keeps `logger_name` as its rendered logger name.
pub fn replace_stdlib_logger(logger_name: &str) -> Result<Logger> {
    LoggerFactory::global().get_logger(Some(logger_name))
}
