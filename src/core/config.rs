//! Logging configuration and its resolution from a string mapping
//!
//! [`resolve`] turns a flat `KEY -> value` mapping (normally environment
//! variables) into a validated [`LoggingConfig`]. Every value is checked at
//! resolution time; a `LoggingConfig` holding an invalid combination cannot be
//! constructed.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

pub const LEVEL_KEY: &str = "LOGGING_LEVEL";
pub const FORMAT_KEY: &str = "LOGGING_FORMAT";
pub const OUTPUT_KEY: &str = "LOGGING_OUTPUT";
pub const FILE_PATH_KEY: &str = "LOGGING_FILE_PATH";
pub const INCLUDE_LOCATION_KEY: &str = "LOGGING_INCLUDE_LOCATION";
pub const LOGGER_NAME_KEY: &str = "LOGGING_LOGGER_NAME";

pub const DEFAULT_FILE_PATH: &str = "app.log";
pub const DEFAULT_LOGGER_NAME: &str = "logs";

/// Longest accepted `LOGGING_FILE_PATH`, in characters
pub const MAX_FILE_PATH_LEN: usize = 4096;

/// Rendering of emitted records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// `<timestamp> [<level>] <event> [<logger>] key=value ...`
    #[default]
    Console,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    pub fn to_str(&self) -> &'static str {
        match self {
            LogFormat::Console => "console",
            LogFormat::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "console" => Ok(LogFormat::Console),
            "json" => Ok(LogFormat::Json),
            _ => Err("must be one of: console, json".to_string()),
        }
    }
}

/// Destination of rendered records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    File,
}

impl LogOutput {
    pub fn to_str(&self) -> &'static str {
        match self {
            LogOutput::Stdout => "stdout",
            LogOutput::File => "file",
        }
    }
}

impl fmt::Display for LogOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogOutput {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stdout" => Ok(LogOutput::Stdout),
            "file" => Ok(LogOutput::File),
            _ => Err("must be one of: stdout, file".to_string()),
        }
    }
}

/// Parse a configuration boolean (`true/false/1/0/yes/no`, any case)
pub fn parse_bool(value: &str) -> std::result::Result<bool, String> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err("must be one of: true, false, 1, 0, yes, no".to_string()),
    }
}

/// Validated logging configuration
///
/// Fields are private: values come either from [`resolve`] or from
/// [`LoggingConfigBuilder::build`], both of which validate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LoggingConfig {
    level: LogLevel,
    format: LogFormat,
    output: LogOutput,
    file_path: String,
    include_location: bool,
    logger_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Debug,
            format: LogFormat::Console,
            output: LogOutput::Stdout,
            file_path: DEFAULT_FILE_PATH.to_string(),
            include_location: false,
            logger_name: DEFAULT_LOGGER_NAME.to_string(),
        }
    }
}

impl LoggingConfig {
    /// Start a builder from the default configuration
    #[must_use]
    pub fn builder() -> LoggingConfigBuilder {
        LoggingConfigBuilder::new()
    }

    /// Resolve a configuration from a string mapping, see [`resolve`]
    pub fn from_mapping(mapping: &HashMap<String, String>) -> Result<Self> {
        resolve(mapping)
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    pub fn output(&self) -> LogOutput {
        self.output
    }

    /// Log file path; only meaningful when `output` is [`LogOutput::File`]
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn include_location(&self) -> bool {
        self.include_location
    }

    pub fn logger_name(&self) -> &str {
        &self.logger_name
    }

    fn validate(&self) -> Result<()> {
        if self.output == LogOutput::File && self.file_path.is_empty() {
            return Err(LoggerError::config_validation(
                FILE_PATH_KEY,
                &self.file_path,
                "must be a non-empty path when LOGGING_OUTPUT=file",
            ));
        }
        let path_len = self.file_path.chars().count();
        if path_len > MAX_FILE_PATH_LEN {
            return Err(LoggerError::config_validation(
                FILE_PATH_KEY,
                &self.file_path,
                format!(
                    "is too long (max {} characters, got {})",
                    MAX_FILE_PATH_LEN, path_len
                ),
            ));
        }
        if self.logger_name.is_empty() {
            return Err(LoggerError::config_validation(
                LOGGER_NAME_KEY,
                &self.logger_name,
                "must be a non-empty string",
            ));
        }
        Ok(())
    }
}

/// Builder for constructing a validated [`LoggingConfig`] in code
///
/// # Example
/// ```
/// use structured_logs::{LogFormat, LogLevel, LoggingConfig};
///
/// let config = LoggingConfig::builder()
///     .level(LogLevel::Info)
///     .format(LogFormat::Json)
///     .build()
///     .unwrap();
/// assert_eq!(config.logger_name(), "logs");
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoggingConfigBuilder {
    config: LoggingConfig,
}

impl LoggingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: LogFormat) -> Self {
        self.config.format = format;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output(mut self, output: LogOutput) -> Self {
        self.config.output = output;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn file_path(mut self, path: impl Into<String>) -> Self {
        self.config.file_path = path.into();
        self
    }

    /// Shorthand for `output(LogOutput::File).file_path(path)`
    #[must_use = "builder methods return a new value"]
    pub fn file(self, path: impl Into<String>) -> Self {
        self.output(LogOutput::File).file_path(path)
    }

    #[must_use = "builder methods return a new value"]
    pub fn include_location(mut self, include: bool) -> Self {
        self.config.include_location = include;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn logger_name(mut self, name: impl Into<String>) -> Self {
        self.config.logger_name = name.into();
        self
    }

    /// Validate and produce the configuration
    pub fn build(self) -> Result<LoggingConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

fn parse_key<T>(
    mapping: &HashMap<String, String>,
    key: &str,
    default: T,
    parse: impl FnOnce(&str) -> std::result::Result<T, String>,
) -> Result<T> {
    match mapping.get(key) {
        Some(raw) => parse(raw.as_str())
            .map_err(|message| LoggerError::config_validation(key, raw, message)),
        None => Ok(default),
    }
}

/// Resolve a [`LoggingConfig`] from a string mapping
///
/// Absent keys take their defaults. Enumerated values match
/// case-insensitively. The first offending key fails the whole resolution
/// with [`LoggerError::ConfigValidation`]. Resolution never touches the
/// filesystem or process-wide state.
pub fn resolve(mapping: &HashMap<String, String>) -> Result<LoggingConfig> {
    let level = parse_key(mapping, LEVEL_KEY, LogLevel::Debug, str::parse)?;
    let format = parse_key(mapping, FORMAT_KEY, LogFormat::Console, str::parse)?;
    let output = parse_key(mapping, OUTPUT_KEY, LogOutput::Stdout, str::parse)?;
    let include_location = parse_key(mapping, INCLUDE_LOCATION_KEY, false, parse_bool)?;

    let file_path = mapping
        .get(FILE_PATH_KEY)
        .cloned()
        .unwrap_or_else(|| DEFAULT_FILE_PATH.to_string());
    let logger_name = mapping
        .get(LOGGER_NAME_KEY)
        .cloned()
        .unwrap_or_else(|| DEFAULT_LOGGER_NAME.to_string());

    let config = LoggingConfig {
        level,
        format,
        output,
        file_path,
        include_location,
        logger_name,
    };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = resolve(&HashMap::new()).unwrap();
        assert_eq!(config, LoggingConfig::default());
        assert_eq!(config.level(), LogLevel::Debug);
        assert_eq!(config.format(), LogFormat::Console);
        assert_eq!(config.output(), LogOutput::Stdout);
        assert_eq!(config.file_path(), "app.log");
        assert!(!config.include_location());
        assert_eq!(config.logger_name(), "logs");
    }

    #[test]
    fn test_all_keys() {
        let config = resolve(&mapping(&[
            ("LOGGING_LEVEL", "warning"),
            ("LOGGING_FORMAT", "JSON"),
            ("LOGGING_OUTPUT", "File"),
            ("LOGGING_FILE_PATH", "/tmp/out.log"),
            ("LOGGING_INCLUDE_LOCATION", "YES"),
            ("LOGGING_LOGGER_NAME", "pipeline"),
        ]))
        .unwrap();

        assert_eq!(config.level(), LogLevel::Warning);
        assert_eq!(config.format(), LogFormat::Json);
        assert_eq!(config.output(), LogOutput::File);
        assert_eq!(config.file_path(), "/tmp/out.log");
        assert!(config.include_location());
        assert_eq!(config.logger_name(), "pipeline");
    }

    #[test]
    fn test_invalid_level_names_key_and_value() {
        let err = resolve(&mapping(&[("LOGGING_LEVEL", "verbose")])).unwrap_err();
        match err {
            LoggerError::ConfigValidation { key, value, message } => {
                assert_eq!(key, "LOGGING_LEVEL");
                assert_eq!(value, "verbose");
                assert!(message.contains("CRITICAL"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_enumerations() {
        for (key, value) in [
            ("LOGGING_FORMAT", "xml"),
            ("LOGGING_OUTPUT", "stderr"),
            ("LOGGING_INCLUDE_LOCATION", "maybe"),
        ] {
            let err = resolve(&mapping(&[(key, value)])).unwrap_err();
            assert_eq!(err.key(), Some(key));
            assert!(err.to_string().contains(value));
        }
    }

    #[test]
    fn test_boolean_spellings() {
        for (raw, expected) in [
            ("true", true),
            ("TRUE", true),
            ("1", true),
            ("Yes", true),
            ("false", false),
            ("0", false),
            ("NO", false),
        ] {
            let config = resolve(&mapping(&[("LOGGING_INCLUDE_LOCATION", raw)])).unwrap();
            assert_eq!(config.include_location(), expected, "input {raw}");
        }
    }

    #[test]
    fn test_empty_file_path_only_rejected_for_file_output() {
        let err = resolve(&mapping(&[
            ("LOGGING_OUTPUT", "file"),
            ("LOGGING_FILE_PATH", ""),
        ]))
        .unwrap_err();
        assert_eq!(err.key(), Some("LOGGING_FILE_PATH"));

        let config = resolve(&mapping(&[("LOGGING_FILE_PATH", "")])).unwrap();
        assert_eq!(config.output(), LogOutput::Stdout);
    }

    #[test]
    fn test_file_path_too_long() {
        let long = "a".repeat(MAX_FILE_PATH_LEN + 1);
        let err = resolve(&mapping(&[("LOGGING_FILE_PATH", &long)])).unwrap_err();
        assert_eq!(err.key(), Some("LOGGING_FILE_PATH"));
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn test_empty_logger_name_rejected() {
        let err = resolve(&mapping(&[("LOGGING_LOGGER_NAME", "")])).unwrap_err();
        assert_eq!(err.key(), Some("LOGGING_LOGGER_NAME"));
    }

    #[test]
    fn test_unrelated_keys_ignored() {
        let config = resolve(&mapping(&[("PATH", "/usr/bin"), ("PROFILE", "dev")])).unwrap();
        assert_eq!(config, LoggingConfig::default());
    }

    #[test]
    fn test_builder_validates() {
        assert!(LoggingConfig::builder().file("").build().is_err());
        assert!(LoggingConfig::builder().logger_name("").build().is_err());

        let config = LoggingConfig::builder()
            .level(LogLevel::Error)
            .file("out.log")
            .build()
            .unwrap();
        assert_eq!(config.output(), LogOutput::File);
        assert_eq!(config.file_path(), "out.log");
    }

    #[test]
    fn test_equal_mappings_resolve_equal() {
        let m = mapping(&[("LOGGING_LEVEL", "info"), ("LOGGING_FORMAT", "json")]);
        assert_eq!(resolve(&m).unwrap(), resolve(&m).unwrap());
    }
}
