//! Renderer trait turning a processed record into one line

use super::error::Result;
use super::record::LogRecord;

/// Terminal step of the processor chain
///
/// Field values are restricted to JSON-representable types, so the built-in
/// renderers only fail if the underlying serializer reports an error. Such a
/// failure is returned to the logging call.
pub trait Renderer: Send + Sync {
    fn render(&self, record: &LogRecord) -> Result<String>;
    fn name(&self) -> &str;
}
