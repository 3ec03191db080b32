//! Human-readable console renderer

use crate::core::{FieldValue, LogRecord, Renderer, Result};
use std::borrow::Cow;
#[cfg(feature = "console")]
use colored::Colorize;

/// Width the level name is padded to inside the brackets
pub const LEVEL_WIDTH: usize = 9;

/// Width the event is padded to before the logger name
pub const EVENT_WIDTH: usize = 30;

/// Renders `<timestamp> [<level>] <event> [<logger>] key=value ...`
///
/// # Example
///
/// ```
/// use structured_logs::core::{LogLevel, LogRecord, Renderer};
/// use structured_logs::renderers::ConsoleRenderer;
///
/// let mut record = LogRecord::new(LogLevel::Info, "started", "logs");
/// record.timestamp = Some("2025-01-08T10:30:45.123456Z".to_string());
///
/// let line = ConsoleRenderer::new().render(&record).unwrap();
/// assert!(line.starts_with("2025-01-08T10:30:45.123456Z [info     ] started"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConsoleRenderer {
    use_colors: bool,
}

impl ConsoleRenderer {
    pub fn new() -> Self {
        Self { use_colors: false }
    }

    /// Color the level name; only honored with the `console` feature
    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    #[cfg(feature = "console")]
    fn format_level(&self, record: &LogRecord) -> String {
        let padded = format!("{:<width$}", record.level_name(), width = LEVEL_WIDTH);
        if self.use_colors {
            padded.color(record.level.color_code()).to_string()
        } else {
            padded
        }
    }

    #[cfg(not(feature = "console"))]
    fn format_level(&self, record: &LogRecord) -> String {
        let _ = self.use_colors;
        format!("{:<width$}", record.level_name(), width = LEVEL_WIDTH)
    }

    /// Escape newlines, carriage returns, and tabs so a record stays on one
    /// line and cannot inject fake entries
    pub fn escape(text: &str) -> Cow<'_, str> {
        if !text.contains(['\n', '\r', '\t']) {
            return Cow::Borrowed(text);
        }
        let mut escaped = String::with_capacity(text.len() + 8);
        for c in text.chars() {
            match c {
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                other => escaped.push(other),
            }
        }
        Cow::Owned(escaped)
    }

    fn format_value(value: &FieldValue) -> String {
        match value {
            FieldValue::String(s) => Self::escape(s).into_owned(),
            other => Self::escape(&other.to_string()).into_owned(),
        }
    }
}

impl Renderer for ConsoleRenderer {
    fn render(&self, record: &LogRecord) -> Result<String> {
        let mut line = format!(
            "{} [{}] {:<width$} [{}]",
            record.timestamp.as_deref().unwrap_or_default(),
            self.format_level(record),
            Self::escape(&record.event),
            Self::escape(&record.logger),
            width = EVENT_WIDTH
        );

        for (key, value) in record.extra_fields() {
            line.push(' ');
            line.push_str(&Self::escape(key));
            line.push('=');
            line.push_str(&Self::format_value(&value));
        }

        Ok(line)
    }

    fn name(&self) -> &str {
        "console"
    }
}
