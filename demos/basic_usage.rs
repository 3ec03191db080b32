//! Basic logger usage example
//!
//! Demonstrates configuring from a mapping, logging at every level, and
//! switching between console and JSON output.
//!
//! Run with: cargo run --example basic_usage

use std::collections::HashMap;
use structured_logs::prelude::*;
use structured_logs::{critical, info, warning};

fn mapping(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn main() -> Result<()> {
    println!("=== Structured Logs - Basic Usage Example ===\n");

    let factory = LoggerFactory::new();

    println!("1. Console output at every level:");
    factory.configure(None, Some(&mapping(&[("LOGGING_LEVEL", "DEBUG")])))?;
    let logger = factory.get_logger(None)?;
    logger.debug("debug event")?;
    logger.info("info event")?;
    warning!(logger, "disk space low"; free_mb = 512)?;
    logger.error("error event")?;
    critical!(logger, "critical event"; code = 500)?;

    println!("\n2. Minimum level set to WARNING - debug and info are dropped:");
    factory.configure(None, Some(&mapping(&[("LOGGING_LEVEL", "warning")])))?;
    logger.debug("hidden")?;
    logger.info("hidden")?;
    logger.warning("visible")?;

    println!("\n3. JSON output with a handler logger:");
    factory.configure(
        None,
        Some(&mapping(&[
            ("LOGGING_LEVEL", "INFO"),
            ("LOGGING_FORMAT", "json"),
            ("LOGGING_INCLUDE_LOCATION", "true"),
        ])),
    )?;
    let handler = factory.get_handler_logger("api")?;
    info!(handler, "started"; version = "1.0.0")?;

    println!("\n4. Active configuration:");
    if let Some(config) = factory.get_config() {
        let entries = structured_logs::tools::config_entries(&config);
        structured_logs::tools::log_config_table(&handler, &entries, &Fields::new())?;
        println!("   (table is logged at debug level, so it is hidden at INFO)");
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
