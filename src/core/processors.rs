//! Record processors applied before rendering
//!
//! The pipeline runs these in a fixed order: timestamp, level, location
//! (optional), context merge.

use super::context::ContextBinder;
use super::record::{CallSite, LogRecord};
use chrono::{DateTime, Utc};

/// A step that enriches a record in place
pub trait Processor: Send + Sync {
    fn process(&self, record: &mut LogRecord);
    fn name(&self) -> &str;
}

/// Attaches the current UTC time as ISO 8601 with microseconds
#[derive(Debug, Default, Clone, Copy)]
pub struct TimestampProcessor;

impl TimestampProcessor {
    /// Format like `2025-01-08T10:30:45.123456Z`
    #[must_use]
    pub fn format(datetime: &DateTime<Utc>) -> String {
        datetime.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
    }
}

impl Processor for TimestampProcessor {
    fn process(&self, record: &mut LogRecord) {
        record.timestamp = Some(Self::format(&Utc::now()));
    }

    fn name(&self) -> &str {
        "timestamp"
    }
}

/// Attaches the lowercase severity name
#[derive(Debug, Default, Clone, Copy)]
pub struct LevelProcessor;

impl Processor for LevelProcessor {
    fn process(&self, record: &mut LogRecord) {
        record.level_name = Some(record.level.name());
    }

    fn name(&self) -> &str {
        "level"
    }
}

/// Attaches `filename`, `lineno` and `module` of the logging call
///
/// Records without a captured call site pass through unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocationProcessor;

impl Processor for LocationProcessor {
    fn process(&self, record: &mut LogRecord) {
        record.location = record.caller.map(CallSite::from_location);
    }

    fn name(&self) -> &str {
        "location"
    }
}

/// Merges the current context's bound fields into the record
///
/// Fields given with the call, and fields bound to the handle, win on key
/// collision.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContextMergeProcessor;

impl Processor for ContextMergeProcessor {
    fn process(&self, record: &mut LogRecord) {
        for (key, value) in ContextBinder::snapshot().iter() {
            if !record.has_key(key) {
                record.fields.insert(key.clone(), value.clone());
            }
        }
    }

    fn name(&self) -> &str {
        "context_merge"
    }
}
