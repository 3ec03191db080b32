//! Integration tests for the logging facility
//!
//! These tests verify:
//! - File output ordering and log injection prevention
//! - JSON end-to-end output
//! - Configure/reset lifecycle
//! - Handler loggers
//! - Context isolation between threads
//! - Concurrent writers never interleave lines

use std::collections::HashMap;
use std::fs;
use std::sync::Arc;
use std::thread;
use structured_logs::core::LogOutput;
use structured_logs::{
    info, ContextBinder, Fields, LogFormat, LogLevel, LoggerError, LoggerFactory, LoggingConfig,
    MemorySink, PipelineBuilder,
};
use tempfile::TempDir;

fn mapping(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn isolated_factory() -> LoggerFactory {
    LoggerFactory::with_source(HashMap::new())
}

#[test]
fn test_file_output_keeps_call_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("t.log");

    let factory = isolated_factory();
    factory
        .configure(
            None,
            Some(&mapping(&[
                ("LOGGING_OUTPUT", "file"),
                ("LOGGING_FILE_PATH", log_file.to_str().unwrap()),
            ])),
        )
        .expect("Failed to configure");

    let logger = factory.get_logger(None).unwrap();
    logger.info("first").unwrap();
    logger.warning("second").unwrap();
    logger.error("third").unwrap();

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("first"));
    assert!(lines[1].contains("second"));
    assert!(lines[2].contains("third"));
}

#[test]
fn test_log_injection_prevention() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("injection_test.log");

    let factory = isolated_factory();
    let config = LoggingConfig::builder()
        .file(log_file.to_str().unwrap())
        .build()
        .unwrap();
    factory.configure_with(config).unwrap();

    let malicious = "User login\nERROR [2024-10-17] Fake error injected\nINFO Continuation";
    factory.get_default_logger().unwrap().info(malicious).unwrap();

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    assert!(content.contains("\\n"));
    assert_eq!(content.lines().count(), 1, "Log should be a single line");
}

#[test]
fn test_multiline_field_value_stays_on_one_line() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("fields.log");

    let factory = isolated_factory();
    let config = LoggingConfig::builder()
        .file(log_file.to_str().unwrap())
        .build()
        .unwrap();
    factory.configure_with(config).unwrap();

    let logger = factory.get_logger(Some("svc\nINFO forged")).unwrap();
    logger
        .info_with("one", Fields::new().with("note", "a\nERROR [fake] injected"))
        .unwrap();
    logger.info("two").unwrap();
    logger.info("three").unwrap();

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("note=a\\nERROR [fake] injected"));
    assert!(lines.iter().all(|line| line.contains("[svc\\nINFO forged]")));
}

#[test]
fn test_json_event_round_trips() {
    let factory = isolated_factory();
    let sink = MemorySink::new();
    let config = LoggingConfig::builder().format(LogFormat::Json).build().unwrap();
    factory.install_pipeline(PipelineBuilder::new(config).sink(sink.clone()).build().unwrap());

    factory
        .get_default_logger()
        .unwrap()
        .info("line one\nline two")
        .unwrap();

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    let parsed: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(parsed["event"], "line one\nline two");
}

#[test]
fn test_json_end_to_end() {
    let factory = isolated_factory();
    let config = LoggingConfig::from_mapping(&mapping(&[
        ("LOGGING_LEVEL", "INFO"),
        ("LOGGING_FORMAT", "json"),
        ("LOGGING_OUTPUT", "stdout"),
    ]))
    .unwrap();
    let sink = MemorySink::new();
    factory.install_pipeline(PipelineBuilder::new(config).sink(sink.clone()).build().unwrap());

    let logger = factory.get_logger(None).unwrap();
    logger.debug("never shown").unwrap();
    info!(logger, "started"; version = "1.0.0").unwrap();

    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("\"event\": \"started\""));
    assert!(lines[0].contains("\"level\": \"info\""));
    assert!(lines[0].contains("\"version\": \"1.0.0\""));

    let parsed: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert!(parsed["timestamp"].is_string());
    assert_eq!(parsed["logger"], "logs");
    assert!(!sink.contents().contains("never shown"));
}

#[test]
fn test_configure_reset_cycle() {
    let factory = LoggerFactory::with_source(mapping(&[("LOGGING_LOGGER_NAME", "svc")]));
    factory
        .configure(None, Some(&mapping(&[("LOGGING_LEVEL", "ERROR")])))
        .unwrap();
    assert_eq!(factory.get_config().unwrap().level(), LogLevel::Error);

    factory.reset();
    assert!(factory.get_config().is_none());

    let logger = factory.get_default_logger().unwrap();
    let config = factory.get_config().expect("re-resolved on demand");
    assert_eq!(config.level(), LogLevel::Debug);
    assert_eq!(logger.name(), "svc");
}

#[test]
fn test_reset_closes_file_and_reconfigure_appends() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("nested").join("app.log");
    let path = log_file.to_str().unwrap().to_string();

    let factory = isolated_factory();
    let config = LoggingConfig::builder().file(path.clone()).build().unwrap();
    factory.configure_with(config.clone()).unwrap();
    factory.get_default_logger().unwrap().info("one").unwrap();

    factory.reset();
    factory.configure_with(config).unwrap();
    factory.get_default_logger().unwrap().info("two").unwrap();

    let content = fs::read_to_string(&log_file).unwrap();
    assert_eq!(content.lines().count(), 2);
}

#[test]
fn test_unopenable_file_keeps_previous_pipeline() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let factory = isolated_factory();
    factory
        .configure(None, Some(&mapping(&[("LOGGING_LEVEL", "WARNING")])))
        .unwrap();

    let err = factory
        .configure(
            None,
            Some(&mapping(&[
                ("LOGGING_OUTPUT", "file"),
                ("LOGGING_FILE_PATH", temp_dir.path().to_str().unwrap()),
            ])),
        )
        .unwrap_err();

    assert!(matches!(err, LoggerError::SinkIo { .. }));
    let config = factory.get_config().unwrap();
    assert_eq!(config.level(), LogLevel::Warning);
    assert_eq!(config.output(), LogOutput::Stdout);
}

#[test]
fn test_validation_error_names_key_and_value() {
    let factory = isolated_factory();
    let err = factory
        .configure(None, Some(&mapping(&[("LOGGING_INCLUDE_LOCATION", "maybe")])))
        .unwrap_err();

    match err {
        LoggerError::ConfigValidation { key, value, .. } => {
            assert_eq!(key, "LOGGING_INCLUDE_LOCATION");
            assert_eq!(value, "maybe");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_handler_logger_console_suffix() {
    let factory = isolated_factory();
    let sink = MemorySink::new();
    factory.install_pipeline(
        PipelineBuilder::new(LoggingConfig::default())
            .sink(sink.clone())
            .build()
            .unwrap(),
    );

    factory
        .get_handler_logger("api")
        .unwrap()
        .info_with("request", Fields::new().with("status", 200))
        .unwrap();
    factory.get_default_logger().unwrap().info("plain").unwrap();

    let lines = sink.lines();
    assert!(lines[0].ends_with("[logs] status=200 handler=api"));
    assert!(lines[0].contains("[info     ]"));
    assert!(!lines[1].contains("handler="));
}

#[test]
fn test_thread_contexts_isolated() {
    let factory = Arc::new(isolated_factory());
    let sink = MemorySink::new();
    let config = LoggingConfig::builder().format(LogFormat::Json).build().unwrap();
    factory.install_pipeline(PipelineBuilder::new(config).sink(sink.clone()).build().unwrap());

    let handles: Vec<_> = ["alpha", "beta"]
        .into_iter()
        .map(|name| {
            let factory = Arc::clone(&factory);
            thread::spawn(move || {
                ContextBinder::bind(Fields::new().with("worker", name).with(name, true));
                let logger = factory.get_default_logger().unwrap();
                for i in 0..50 {
                    logger.info_with("tick", Fields::new().with("i", i)).unwrap();
                }
                ContextBinder::clear();
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let lines = sink.lines();
    assert_eq!(lines.len(), 100);
    for line in &lines {
        let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
        let worker = parsed["worker"].as_str().unwrap();
        let other = if worker == "alpha" { "beta" } else { "alpha" };
        assert_eq!(parsed[worker], true);
        assert!(parsed.get(other).is_none());
    }
}

#[test]
fn test_concurrent_file_writes_do_not_interleave() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("concurrent.log");

    let factory = Arc::new(isolated_factory());
    let config = LoggingConfig::builder()
        .format(LogFormat::Json)
        .file(log_file.to_str().unwrap())
        .build()
        .unwrap();
    factory.configure_with(config).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let factory = Arc::clone(&factory);
            thread::spawn(move || {
                let logger = factory.get_handler_logger(&format!("worker-{t}")).unwrap();
                for i in 0..200 {
                    logger
                        .info_with("write", Fields::new().with("payload", "x".repeat(64)).with("i", i))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }

    let content = fs::read_to_string(&log_file).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 8 * 200);
    for line in lines {
        let parsed: serde_json::Value = serde_json::from_str(line).expect("whole JSON line");
        assert!(parsed["handler"].as_str().unwrap().starts_with("worker-"));
    }
}

#[test]
fn test_concurrent_reconfigure_and_emit() {
    let factory = Arc::new(isolated_factory());
    let sink = MemorySink::new();
    factory.install_pipeline(
        PipelineBuilder::new(LoggingConfig::default())
            .sink(sink.clone())
            .build()
            .unwrap(),
    );
    let logger = factory.get_default_logger().unwrap();

    let writer = {
        let logger = logger.clone();
        thread::spawn(move || {
            for _ in 0..500 {
                logger.critical("tick").unwrap();
            }
        })
    };
    let reconfigurer = {
        let factory = Arc::clone(&factory);
        let sink = sink.clone();
        thread::spawn(move || {
            for round in 0..50 {
                let format = if round % 2 == 0 { LogFormat::Json } else { LogFormat::Console };
                let config = LoggingConfig::builder().format(format).build().unwrap();
                factory.install_pipeline(
                    PipelineBuilder::new(config).sink(sink.clone()).build().unwrap(),
                );
            }
        })
    };
    writer.join().expect("writer panicked");
    reconfigurer.join().expect("reconfigurer panicked");

    assert_eq!(sink.lines().len(), 500);
}
