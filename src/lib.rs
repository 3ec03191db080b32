//! # Structured Logs
//!
//! Configuration-driven structured logging. Verbosity, output format,
//! destination and call-site enrichment come from a flat `LOGGING_*` mapping
//! (environment variables and dotenv files by default) instead of code.
//!
//! ## Features
//!
//! - **Validated configuration**: every key is checked before any pipeline is built
//! - **Console and JSON output**: human-readable lines or one JSON object per line
//! - **Context binding**: fields bound per thread (or per task) are merged into records
//! - **Thread Safe**: one factory, cheap cloneable handles, serialized reconfiguration
//!
//! ## Example
//!
//! ```no_run
//! use structured_logs::{get_logger, info, ContextBinder, Fields};
//!
//! let logger = get_logger(None)?;
//! ContextBinder::bind(Fields::new().with("request_id", "req-123"));
//! info!(logger, "started"; version = "1.0.0")?;
//! # Ok::<(), structured_logs::LoggerError>(())
//! ```

#[cfg(feature = "log-bridge")]
pub mod bridge;
pub mod core;
pub mod macros;
pub mod renderers;
pub mod sinks;
pub mod tools;

pub mod prelude {
    pub use crate::core::{
        ContextBinder, ContextGuard, FieldValue, Fields, LogFormat, LogLevel, LogOutput, Logger,
        LoggerError, LoggerFactory, LoggingConfig, Result,
    };
    pub use crate::sinks::{FileSink, StdoutSink};
}

#[cfg(feature = "log-bridge")]
pub use bridge::{install_log_bridge, LogBridge};
pub use crate::core::{
    get_handler_logger, get_logger, replace_stdlib_logger, resolve, ConfigSource, ContextBinder,
    ContextGuard, EnvSource, FieldValue, Fields, LogFormat, LogLevel, LogOutput, LogRecord, Logger,
    LoggerError, LoggerFactory, LoggingConfig, LoggingConfigBuilder, Pipeline, PipelineBuilder,
    Renderer, Result, Sink,
};
pub use renderers::{ConsoleRenderer, JsonRenderer};
pub use sinks::{FileSink, MemorySink, StdoutSink};
