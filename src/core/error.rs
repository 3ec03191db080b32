//! Error types for the logging facility

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A configuration value is outside its accepted set
    #[error("Invalid value '{value}' for {key}: {message}")]
    ConfigValidation {
        key: String,
        value: String,
        message: String,
    },

    /// Programmer misuse of the API, such as an empty handler name
    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument { argument: String, message: String },

    /// A sink could not be opened, written or flushed
    #[error("Sink error on '{target}' while {operation}: {source}")]
    SinkIo {
        target: String,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file exists but could not be read
    #[error("Failed to load configuration from '{path}': {message}")]
    ConfigSource { path: String, message: String },

    /// A record could not be serialized as JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl LoggerError {
    /// Create a configuration validation error for `key` holding `value`
    pub fn config_validation(
        key: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LoggerError::ConfigValidation {
            key: key.into(),
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }

    /// Create a sink IO error with context
    pub fn sink_io(
        target: impl Into<String>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::SinkIo {
            target: target.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a configuration source error
    pub fn config_source(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::ConfigSource {
            path: path.into(),
            message: message.into(),
        }
    }

    /// The offending configuration key, for validation errors
    pub fn key(&self) -> Option<&str> {
        match self {
            LoggerError::ConfigValidation { key, .. } => Some(key),
            _ => None,
        }
    }
}
