//! JSON renderer for structured logging
//!
//! Writes each record as a single-line JSON object (JSONL), compatible with
//! log aggregation tools like ELK, Loki, etc. Separators follow the common
//! `{"key": "value", "other": 1}` spacing.

use crate::core::{LogRecord, Renderer};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::io;

/// Emits `", "` between items and `": "` between keys and values
#[derive(Debug, Default, Clone, Copy)]
pub struct SpacedFormatter;

impl serde_json::ser::Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Serialization view of a processed record
struct JsonLine<'a>(&'a LogRecord);

impl Serialize for JsonLine<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let record = self.0;
        let extras = record.extra_fields();

        let mut map = serializer.serialize_map(Some(4 + extras.len()))?;
        map.serialize_entry("event", &record.event)?;
        map.serialize_entry("level", record.level_name())?;
        map.serialize_entry("logger", &record.logger)?;
        map.serialize_entry("timestamp", &record.timestamp)?;
        for (key, value) in &extras {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Renders `{"event": ..., "level": ..., "logger": ..., "timestamp": ..., ...}`
///
/// Strings are escaped by the JSON encoder, so the event and field values
/// round-trip unchanged and each record stays on one line.
#[derive(Debug, Clone, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Serialize a record to one JSON line
    pub fn to_json(record: &LogRecord) -> Result<String, serde_json::Error> {
        let mut buffer = Vec::with_capacity(256);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, SpacedFormatter);
        JsonLine(record).serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, record: &LogRecord) -> crate::core::Result<String> {
        Ok(Self::to_json(record)?)
    }

    fn name(&self) -> &str {
        "json"
    }
}
