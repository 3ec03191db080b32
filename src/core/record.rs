//! Log record flowing through the processor chain

use super::log_context::{FieldValue, Fields};
use super::log_level::LogLevel;
use std::panic::Location;

/// Keys written by the pipeline itself; call fields with these names are
/// shadowed by the processor values
pub const RESERVED_KEYS: [&str; 4] = ["event", "level", "logger", "timestamp"];

/// Keys attached by the location processor
pub const LOCATION_KEYS: [&str; 3] = ["filename", "lineno", "module"];

/// Source location of a logging call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// File name without directories, e.g. `main.rs`
    pub filename: String,
    pub lineno: u32,
    /// File stem, e.g. `main`
    pub module: String,
}

impl CallSite {
    /// Derive a call site from a location captured with `#[track_caller]`
    pub fn from_location(location: &Location<'_>) -> Self {
        let path = std::path::Path::new(location.file());
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| location.file().to_string());
        let module = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| filename.clone());
        Self {
            filename,
            lineno: location.line(),
            module,
        }
    }
}

/// One emitted event, enriched by processors before rendering
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub level: LogLevel,
    pub event: String,
    /// Logger name rendered as `logger`
    pub logger: String,
    /// Fields passed with the logging call, then merged context fields
    pub fields: Fields,
    /// Fields bound to the emitting handle, such as `handler`
    pub bound: Fields,
    /// Location captured at the call; `None` when unavailable
    pub caller: Option<&'static Location<'static>>,
    /// Set by the timestamp processor
    pub timestamp: Option<String>,
    /// Set by the level processor
    pub level_name: Option<&'static str>,
    /// Set by the location processor
    pub location: Option<CallSite>,
}

impl LogRecord {
    /// Build a record; the event is kept verbatim and escaped by renderers
    pub fn new(level: LogLevel, event: impl Into<String>, logger: impl Into<String>) -> Self {
        Self {
            level,
            event: event.into(),
            logger: logger.into(),
            fields: Fields::new(),
            bound: Fields::new(),
            caller: None,
            timestamp: None,
            level_name: None,
            location: None,
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = fields;
        self
    }

    /// Attach handle-bound fields; explicit fields win on key collision
    #[must_use]
    pub fn with_bound(mut self, bound: &Fields) -> Self {
        self.bound = bound
            .iter()
            .filter(|(key, _)| !self.fields.contains_key(key))
            .cloned()
            .collect();
        self
    }

    #[must_use]
    pub fn with_caller(mut self, caller: &'static Location<'static>) -> Self {
        self.caller = Some(caller);
        self
    }

    /// Whether `key` is already set by the call or the handle
    pub fn has_key(&self, key: &str) -> bool {
        self.fields.contains_key(key) || self.bound.contains_key(key)
    }

    /// Name attached by the level processor, or the plain severity name
    pub fn level_name(&self) -> &'static str {
        self.level_name.unwrap_or_else(|| self.level.name())
    }

    /// Key/value pairs rendered after the fixed keys, in output order
    ///
    /// Call and context fields come first, then location, then handle-bound
    /// fields. Keys owned by the pipeline are skipped.
    pub fn extra_fields(&self) -> Vec<(&str, FieldValue)> {
        let shadowed = |key: &str| {
            RESERVED_KEYS.contains(&key)
                || (self.location.is_some() && LOCATION_KEYS.contains(&key))
        };

        let mut extras: Vec<(&str, FieldValue)> = self
            .fields
            .iter()
            .filter(|(key, _)| !shadowed(key.as_str()))
            .map(|(key, value)| (key.as_str(), value.clone()))
            .collect();

        if let Some(site) = &self.location {
            extras.push(("filename", FieldValue::from(site.filename.as_str())));
            extras.push(("lineno", FieldValue::from(site.lineno)));
            extras.push(("module", FieldValue::from(site.module.as_str())));
        }

        extras.extend(
            self.bound
                .iter()
                .filter(|(key, _)| !shadowed(key.as_str()))
                .map(|(key, value)| (key.as_str(), value.clone())),
        );
        extras
    }
}
