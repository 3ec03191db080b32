//! Logger handle issued by [`LoggerFactory`]
//!
//! [`LoggerFactory`]: super::factory::LoggerFactory

use super::config::DEFAULT_LOGGER_NAME;
use super::error::Result;
use super::factory::FactoryShared;
use super::log_context::{FieldValue, Fields};
use super::log_level::LogLevel;
use super::record::LogRecord;
use std::panic::Location;
use std::sync::Weak;

/// Name rendered as `logger` in every record of a handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LoggerName {
    /// Follows the active configuration's `logger_name`
    Default,
    Named(String),
}

/// Cheap, cloneable handle emitting records through the factory's pipeline
///
/// The handle looks the active pipeline up on every call, so it observes
/// later `configure` and `reset` calls on its factory. Once the factory is
/// dropped, records are discarded.
///
/// Every emitting method returns the sink's write result. Records below the
/// configured level return `Ok(())` without being processed.
#[derive(Clone)]
pub struct Logger {
    factory: Weak<FactoryShared>,
    name: LoggerName,
    bound: Fields,
}

impl Logger {
    pub(crate) fn new(factory: Weak<FactoryShared>, name: LoggerName, bound: Fields) -> Self {
        Self {
            factory,
            name,
            bound,
        }
    }

    /// Logger name rendered in records
    pub fn name(&self) -> String {
        match &self.name {
            LoggerName::Named(name) => name.clone(),
            LoggerName::Default => self
                .factory
                .upgrade()
                .and_then(|shared| shared.configured_logger_name())
                .unwrap_or_else(|| DEFAULT_LOGGER_NAME.to_string()),
        }
    }

    /// Fields attached to every record of this handle
    pub fn bound_fields(&self) -> &Fields {
        &self.bound
    }

    /// New handle with `key=value` added to the bound fields
    #[must_use]
    pub fn bind<K, V>(&self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut bound = self.bound.clone();
        bound.insert(key, value);
        Self {
            factory: self.factory.clone(),
            name: self.name.clone(),
            bound,
        }
    }

    /// Whether a record at `level` would currently be written
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        let Some(shared) = self.factory.upgrade() else {
            return false;
        };
        let enabled = match shared.read_configured() {
            Ok(state) => state
                .pipeline
                .as_ref()
                .is_some_and(|pipeline| pipeline.is_enabled(level)),
            Err(_) => false,
        };
        enabled
    }

    pub(crate) fn emit(
        &self,
        level: LogLevel,
        event: &str,
        fields: Fields,
        caller: Option<&'static Location<'static>>,
    ) -> Result<()> {
        let Some(shared) = self.factory.upgrade() else {
            return Ok(());
        };
        let state = shared.read_configured()?;
        let Some(pipeline) = state.pipeline.as_ref() else {
            return Ok(());
        };
        if !pipeline.is_enabled(level) {
            return Ok(());
        }

        let logger = match &self.name {
            LoggerName::Named(name) => name.clone(),
            LoggerName::Default => pipeline.config().logger_name().to_string(),
        };
        let mut record = LogRecord::new(level, event, logger)
            .with_fields(fields)
            .with_bound(&self.bound);
        record.caller = caller;
        pipeline.emit(record)
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, event: &str) -> Result<()> {
        self.emit(level, event, Fields::new(), Some(Location::caller()))
    }

    #[track_caller]
    pub fn log_with(&self, level: LogLevel, event: &str, fields: Fields) -> Result<()> {
        self.emit(level, event, fields, Some(Location::caller()))
    }

    #[track_caller]
    pub fn debug(&self, event: &str) -> Result<()> {
        self.emit(LogLevel::Debug, event, Fields::new(), Some(Location::caller()))
    }

    #[track_caller]
    pub fn info(&self, event: &str) -> Result<()> {
        self.emit(LogLevel::Info, event, Fields::new(), Some(Location::caller()))
    }

    #[track_caller]
    pub fn warning(&self, event: &str) -> Result<()> {
        self.emit(LogLevel::Warning, event, Fields::new(), Some(Location::caller()))
    }

    #[track_caller]
    pub fn error(&self, event: &str) -> Result<()> {
        self.emit(LogLevel::Error, event, Fields::new(), Some(Location::caller()))
    }

    #[track_caller]
    pub fn critical(&self, event: &str) -> Result<()> {
        self.emit(LogLevel::Critical, event, Fields::new(), Some(Location::caller()))
    }

    #[track_caller]
    pub fn debug_with(&self, event: &str, fields: Fields) -> Result<()> {
        self.emit(LogLevel::Debug, event, fields, Some(Location::caller()))
    }

    #[track_caller]
    pub fn info_with(&self, event: &str, fields: Fields) -> Result<()> {
        self.emit(LogLevel::Info, event, fields, Some(Location::caller()))
    }

    #[track_caller]
    pub fn warning_with(&self, event: &str, fields: Fields) -> Result<()> {
        self.emit(LogLevel::Warning, event, fields, Some(Location::caller()))
    }

    #[track_caller]
    pub fn error_with(&self, event: &str, fields: Fields) -> Result<()> {
        self.emit(LogLevel::Error, event, fields, Some(Location::caller()))
    }

    #[track_caller]
    pub fn critical_with(&self, event: &str, fields: Fields) -> Result<()> {
        self.emit(LogLevel::Critical, event, fields, Some(Location::caller()))
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("bound", &self.bound.format_fields())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        ContextBinder, LogFormat, LoggerFactory, LoggingConfig, PipelineBuilder,
    };
    use crate::sinks::MemorySink;
    use std::collections::HashMap;

    fn json_factory(level: LogLevel) -> (LoggerFactory, MemorySink) {
        let factory = LoggerFactory::with_source(HashMap::new());
        let sink = MemorySink::new();
        let config = LoggingConfig::builder()
            .level(level)
            .format(LogFormat::Json)
            .build()
            .unwrap();
        factory.install_pipeline(PipelineBuilder::new(config).sink(sink.clone()).build().unwrap());
        (factory, sink)
    }

    fn parsed(sink: &MemorySink) -> Vec<serde_json::Value> {
        sink.lines()
            .iter()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_level_methods() {
        let (factory, sink) = json_factory(LogLevel::Debug);
        let logger = factory.get_logger(None).unwrap();

        logger.debug("d").unwrap();
        logger.info("i").unwrap();
        logger.warning("w").unwrap();
        logger.error("e").unwrap();
        logger.critical("c").unwrap();

        let levels: Vec<String> = parsed(&sink)
            .iter()
            .map(|v| v["level"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(levels, vec!["debug", "info", "warning", "error", "critical"]);
    }

    #[test]
    fn test_named_logger() {
        let (factory, sink) = json_factory(LogLevel::Debug);
        let logger = factory.get_logger(Some("payments")).unwrap();
        assert_eq!(logger.name(), "payments");

        logger.info("charged").unwrap();
        assert_eq!(parsed(&sink)[0]["logger"], "payments");
    }

    #[test]
    fn test_handler_logger_carries_handler() {
        let (factory, sink) = json_factory(LogLevel::Debug);
        factory.get_handler_logger("api").unwrap().info("with").unwrap();
        factory.get_default_logger().unwrap().info("without").unwrap();

        let records = parsed(&sink);
        assert_eq!(records[0]["handler"], "api");
        assert_eq!(records[0]["logger"], "logs");
        assert!(records[1].get("handler").is_none());
    }

    #[test]
    fn test_bind_returns_new_handle() {
        let (factory, sink) = json_factory(LogLevel::Debug);
        let base = factory.get_default_logger().unwrap();
        let bound = base.bind("tenant", "acme");

        bound.info("bound").unwrap();
        base.info("plain").unwrap();

        let records = parsed(&sink);
        assert_eq!(records[0]["tenant"], "acme");
        assert!(records[1].get("tenant").is_none());
        assert!(base.bound_fields().is_empty());
    }

    #[test]
    fn test_call_fields_context_and_filtering() {
        let (factory, sink) = json_factory(LogLevel::Warning);
        let logger = factory.get_default_logger().unwrap();

        ContextBinder::clear();
        let _guard = ContextBinder::bound(Fields::new().with("request_id", "ctx").with("user", 7));
        logger.info_with("dropped", Fields::new()).unwrap();
        logger
            .warning_with("kept", Fields::new().with("request_id", "explicit"))
            .unwrap();

        let records = parsed(&sink);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["request_id"], "explicit");
        assert_eq!(records[0]["user"], 7);
        assert!(!logger.is_enabled(LogLevel::Info));
        assert!(logger.is_enabled(LogLevel::Error));
    }

    #[test]
    fn test_handle_observes_reconfigure() {
        let (factory, sink) = json_factory(LogLevel::Debug);
        let logger = factory.get_default_logger().unwrap();
        logger.debug("before").unwrap();

        let config = LoggingConfig::builder()
            .level(LogLevel::Error)
            .format(LogFormat::Json)
            .logger_name("renamed")
            .build()
            .unwrap();
        factory.install_pipeline(PipelineBuilder::new(config).sink(sink.clone()).build().unwrap());
        logger.debug("after").unwrap();
        logger.error("shown").unwrap();

        let records = parsed(&sink);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["logger"], "renamed");
        assert_eq!(logger.name(), "renamed");
    }

    #[test]
    fn test_records_dropped_after_factory_gone() {
        let (factory, sink) = json_factory(LogLevel::Debug);
        let logger = factory.get_default_logger().unwrap();
        drop(factory);

        logger.info("orphan").unwrap();
        assert!(sink.lines().is_empty());
        assert!(!logger.is_enabled(LogLevel::Critical));
    }
}
