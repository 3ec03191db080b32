//! File logging example
//!
//! Demonstrates writing JSON lines to a file configured through
//! `LOGGING_*` keys, then reading them back.
//!
//! Run with: cargo run --example file_logging

use std::collections::HashMap;
use structured_logs::prelude::*;

fn main() -> Result<()> {
    println!("=== Structured Logs - File Logging Example ===\n");

    let path = std::env::temp_dir().join("structured_logs_demo").join("application.log");
    let path_str = path.to_string_lossy().into_owned();

    let mapping: HashMap<String, String> = [
        ("LOGGING_LEVEL", "INFO"),
        ("LOGGING_FORMAT", "json"),
        ("LOGGING_OUTPUT", "file"),
        ("LOGGING_FILE_PATH", path_str.as_str()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let factory = LoggerFactory::new();
    factory.configure(None, Some(&mapping))?;

    println!("1. Logging to {}", path.display());
    let logger = factory.get_logger(Some("file_demo"))?;
    logger.info("Application started")?;
    logger.debug("Loading configuration...")?;
    logger.info_with("Configuration loaded", Fields::new().with("entries", 6))?;
    logger.warning("Using default settings for some options")?;
    logger.error_with(
        "Failed to load optional plugin",
        Fields::new().with("plugin", "metrics"),
    )?;

    // Closes the file
    factory.reset();

    println!("\n2. File contents (debug record was filtered):");
    let content = std::fs::read_to_string(&path)
        .map_err(|e| LoggerError::sink_io(&path_str, "reading back", e))?;
    for line in content.lines() {
        println!("   {}", line);
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
