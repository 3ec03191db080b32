//! Helpers for logging tabular data

use crate::core::{FieldValue, Fields, Logger, LoggingConfig, Result};

/// Render `entries` as an ASCII table, one string per line
///
/// Rows sit between two borders. String values are quoted so empty strings
/// stay visible; columns are at least 3 and 5 characters wide.
///
/// ```
/// use structured_logs::{tools::format_table, Fields};
///
/// let lines = format_table(&Fields::new().with("id", "abc").with("retries", 3));
/// assert_eq!(lines[0], "+---------+-------+");
/// assert_eq!(lines[1], "| id      | 'abc' |");
/// assert_eq!(lines[2], "| retries | 3     |");
/// assert_eq!(lines[3], lines[0]);
/// ```
pub fn format_table(entries: &Fields) -> Vec<String> {
    let rows: Vec<(&str, String)> = entries
        .iter()
        .map(|(key, value)| (key.as_str(), display_value(value)))
        .collect();

    let key_width = rows
        .iter()
        .map(|(key, _)| key.chars().count())
        .chain(std::iter::once(3))
        .max()
        .unwrap_or(0);
    let value_width = rows
        .iter()
        .map(|(_, value)| value.chars().count())
        .chain(std::iter::once(5))
        .max()
        .unwrap_or(0);

    let border = format!("+-{}-+-{}-+", "-".repeat(key_width), "-".repeat(value_width));
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(border.clone());
    for (key, value) in &rows {
        lines.push(format!("| {:<kw$} | {:<vw$} |", key, value, kw = key_width, vw = value_width));
    }
    lines.push(border);
    lines
}

fn display_value(value: &FieldValue) -> String {
    match value {
        FieldValue::String(s) => format!("'{}'", s),
        other => other.to_string(),
    }
}

/// Event of the record introducing a table
pub const TABLE_INTRO_EVENT: &str = "loaded model with config, config_data";

/// Log `entries` as a table at debug level, one record per line
///
/// An intro record comes first. `fields` are attached to every record, so
/// the rows can be correlated.
#[track_caller]
pub fn log_config_table(logger: &Logger, entries: &Fields, fields: &Fields) -> Result<()> {
    logger.debug_with(TABLE_INTRO_EVENT, fields.clone())?;
    for line in format_table(entries) {
        logger.debug_with(&line, fields.clone())?;
    }
    Ok(())
}

/// Key/value view of a configuration, keyed by the mapping keys it resolves from
pub fn config_entries(config: &LoggingConfig) -> Fields {
    use crate::core::config::{
        FILE_PATH_KEY, FORMAT_KEY, INCLUDE_LOCATION_KEY, LEVEL_KEY, LOGGER_NAME_KEY, OUTPUT_KEY,
    };

    Fields::new()
        .with(LEVEL_KEY, config.level().to_str())
        .with(FORMAT_KEY, config.format().to_str())
        .with(OUTPUT_KEY, config.output().to_str())
        .with(FILE_PATH_KEY, config.file_path())
        .with(INCLUDE_LOCATION_KEY, config.include_location())
        .with(LOGGER_NAME_KEY, config.logger_name())
}
