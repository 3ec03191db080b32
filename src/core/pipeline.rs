//! Processor chain compiled from a [`LoggingConfig`]
//!
//! A pipeline drops records below the configured level before any processor
//! runs, then applies, in order: timestamp, level, location (when
//! `include_location` is set), context merge. The renderer turns the record
//! into one line and the sink writes it.

use super::config::{LogFormat, LogOutput, LoggingConfig};
use super::error::Result;
use super::log_level::LogLevel;
use super::processors::{
    ContextMergeProcessor, LevelProcessor, LocationProcessor, Processor, TimestampProcessor,
};
use super::record::LogRecord;
use super::renderer::Renderer;
use super::sink::Sink;
use crate::renderers::{ConsoleRenderer, JsonRenderer};
use crate::sinks::{FileSink, StdoutSink};

pub struct Pipeline {
    config: LoggingConfig,
    processors: Vec<Box<dyn Processor>>,
    renderer: Box<dyn Renderer>,
    sink: Box<dyn Sink>,
}

impl Pipeline {
    /// Compile the default pipeline for `config`
    pub fn build(config: &LoggingConfig) -> Result<Self> {
        PipelineBuilder::new(config.clone()).build()
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Whether records at `level` pass the severity filter
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.config.level()
    }

    /// Run a record through the chain and write it
    ///
    /// Records below the configured level return `Ok(())` without touching
    /// any processor or the sink.
    pub fn emit(&self, mut record: LogRecord) -> Result<()> {
        if !self.is_enabled(record.level) {
            return Ok(());
        }
        for processor in &self.processors {
            processor.process(&mut record);
        }
        let line = self.renderer.render(&record)?;
        self.sink.write_line(&line)
    }

    pub fn flush(&self) -> Result<()> {
        self.sink.flush()
    }

    /// Processor names in application order
    pub fn processor_names(&self) -> Vec<&str> {
        self.processors.iter().map(|p| p.name()).collect()
    }

    pub fn renderer_name(&self) -> &str {
        self.renderer.name()
    }

    pub fn sink_name(&self) -> &str {
        self.sink.name()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("processors", &self.processor_names())
            .field("renderer", &self.renderer_name())
            .field("sink", &self.sink_name())
            .finish()
    }
}

/// Builder compiling a [`LoggingConfig`] into a [`Pipeline`]
///
/// # Example
/// ```
/// use structured_logs::core::{LoggingConfig, PipelineBuilder};
/// use structured_logs::sinks::MemorySink;
///
/// let sink = MemorySink::new();
/// let pipeline = PipelineBuilder::new(LoggingConfig::default())
///     .sink(sink.clone())
///     .build()
///     .unwrap();
/// assert_eq!(pipeline.processor_names(), vec!["timestamp", "level", "context_merge"]);
/// ```
pub struct PipelineBuilder {
    config: LoggingConfig,
    sink: Option<Box<dyn Sink>>,
}

impl PipelineBuilder {
    pub fn new(config: LoggingConfig) -> Self {
        Self { config, sink: None }
    }

    /// Replace the sink selected by `config.output`
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Build the pipeline, opening the file sink if one is configured
    pub fn build(self) -> Result<Pipeline> {
        let sink: Box<dyn Sink> = match self.sink {
            Some(sink) => sink,
            None => match self.config.output() {
                LogOutput::Stdout => Box::new(StdoutSink::new()),
                LogOutput::File => Box::new(FileSink::open(self.config.file_path())?),
            },
        };

        let mut processors: Vec<Box<dyn Processor>> =
            vec![Box::new(TimestampProcessor), Box::new(LevelProcessor)];
        if self.config.include_location() {
            processors.push(Box::new(LocationProcessor));
        }
        processors.push(Box::new(ContextMergeProcessor));

        let renderer: Box<dyn Renderer> = match self.config.format() {
            LogFormat::Console => Box::new(ConsoleRenderer::with_colors(sink.is_terminal())),
            LogFormat::Json => Box::new(JsonRenderer::new()),
        };

        Ok(Pipeline {
            config: self.config,
            processors,
            renderer,
            sink,
        })
    }
}
