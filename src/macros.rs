//! Logging macros taking structured `key = value` fields.
//!
//! Each macro expands to the matching `*_with` method of [`Logger`], so the
//! call site of the macro is the location recorded when location
//! enrichment is enabled. Every macro evaluates to the method's `Result`.
//!
//! # Examples
//!
//! ```
//! use std::collections::HashMap;
//! use structured_logs::{info, warning, LoggerFactory, Result};
//!
//! # fn main() -> Result<()> {
//! let factory = LoggerFactory::with_source(HashMap::new());
//! let logger = factory.get_logger(Some("api"))?;
//!
//! // Event only
//! info!(logger, "server started")?;
//!
//! // Event with fields
//! let port = 8080;
//! info!(logger, "listening"; port = port, tls = false)?;
//! warning!(logger, "slow request"; path = "/health", elapsed_ms = 1250)?;
//! # Ok(())
//! # }
//! ```
//!
//! [`Logger`]: crate::core::Logger

/// Build [`Fields`](crate::core::Fields) from `key = value` pairs.
///
/// ```
/// use structured_logs::fields;
///
/// let fields = fields!(request_id = "req-123", user_id = 456);
/// assert_eq!(fields.format_fields(), "request_id=req-123 user_id=456");
/// ```
#[macro_export]
macro_rules! fields {
    ($($key:ident = $value:expr),* $(,)?) => {
        $crate::core::Fields::new()$(.with(stringify!($key), $value))*
    };
}

/// Log an event at an explicit level.
///
/// ```
/// # use std::collections::HashMap;
/// # use structured_logs::{LogLevel, LoggerFactory};
/// # let logger = LoggerFactory::with_source(HashMap::new()).get_logger(None).unwrap();
/// use structured_logs::log;
/// log!(logger, LogLevel::Info, "simple event").unwrap();
/// log!(logger, LogLevel::Error, "request failed"; status = 500).unwrap();
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $event:expr $(; $($key:ident = $value:expr),* $(,)?)?) => {
        $logger.log_with(
            $level,
            ::std::convert::AsRef::<str>::as_ref(&$event),
            $crate::fields!($($($key = $value),*)?),
        )
    };
}

/// Log a debug-level event.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level event.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level event.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level event.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level event.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::core::LogLevel::Critical, $($arg)+)
    };
}
