//! Core types: configuration, context, records, pipeline and factory

pub mod config;
pub mod context;
pub mod error;
pub mod factory;
pub mod log_context;
pub mod log_level;
pub mod logger;
pub mod pipeline;
pub mod processors;
pub mod record;
pub mod renderer;
pub mod sink;
pub mod source;

pub use config::{
    parse_bool, resolve, LogFormat, LogOutput, LoggingConfig, LoggingConfigBuilder,
    DEFAULT_FILE_PATH, DEFAULT_LOGGER_NAME, FILE_PATH_KEY, FORMAT_KEY, INCLUDE_LOCATION_KEY,
    LEVEL_KEY, LOGGER_NAME_KEY, MAX_FILE_PATH_LEN, OUTPUT_KEY,
};
pub use context::{ContextBinder, ContextGuard};
pub use error::{LoggerError, Result};
pub use factory::{get_handler_logger, get_logger, replace_stdlib_logger, LoggerFactory};
pub use log_context::{FieldValue, Fields};
pub use log_level::LogLevel;
pub use logger::Logger;
pub use pipeline::{Pipeline, PipelineBuilder};
pub use processors::{
    ContextMergeProcessor, LevelProcessor, LocationProcessor, Processor, TimestampProcessor,
};
pub use record::{CallSite, LogRecord};
pub use renderer::Renderer;
pub use sink::Sink;
pub use source::{ConfigSource, EnvSource};
