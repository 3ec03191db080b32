//! Sink implementations

pub mod file;
pub mod memory;
pub mod stdout;

pub use file::FileSink;
pub use memory::MemorySink;
pub use stdout::StdoutSink;

pub use crate::core::Sink;
