//! Context binding example
//!
//! Demonstrates fields bound per thread, scoped guards, and handler loggers.
//!
//! Run with: cargo run --example context_binding

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use structured_logs::prelude::*;
use structured_logs::{fields, info};

fn main() -> Result<()> {
    println!("=== Structured Logs - Context Binding Example ===\n");

    let factory = Arc::new(LoggerFactory::new());
    let mapping: HashMap<String, String> = [("LOGGING_FORMAT".to_string(), "json".to_string())]
        .into_iter()
        .collect();
    factory.configure(None, Some(&mapping))?;

    println!("1. Fields bound on this thread appear on every record:");
    let logger = factory.get_default_logger()?;
    ContextBinder::bind(fields!(request_id = "req-123", user_id = 456));
    info!(logger, "processing request")?;
    info!(logger, "request done"; request_id = "req-123-retry")?;
    ContextBinder::clear();
    logger.info("after clear")?;

    println!("\n2. A guard unbinds its fields when dropped:");
    {
        let _guard = ContextBinder::bound(fields!(job = "nightly"));
        logger.info("inside job")?;
    }
    logger.info("outside job")?;

    println!("\n3. Threads never see each other's fields:");
    let workers: Vec<_> = (0..3)
        .map(|id| {
            let factory = Arc::clone(&factory);
            thread::spawn(move || -> Result<()> {
                ContextBinder::bind(fields!(worker = id));
                let handler = factory.get_handler_logger("worker")?;
                info!(handler, "working"; step = 1)
            })
        })
        .collect();
    for worker in workers {
        match worker.join() {
            Ok(result) => result?,
            Err(_) => eprintln!("worker panicked"),
        }
    }

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
