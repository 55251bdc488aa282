//! Logger construction.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use chrono::Local;

use crate::config::schema::{DEFAULT_EXTENSION_NAME, NOT_SPECIFIED};
use crate::config::{LoggerSettings, ThresholdSetting};
use crate::error::LoggerResult;
use crate::extension::{ConfigStore, ExtensionResolver, MemoryConfigStore};
use crate::lifecycle::bootstrap_log_file;
use crate::logger::facade::Logger;
use crate::observability::ErrorReporter;
use crate::pipeline::{SinkDispatcher, TraceBuffer};
use crate::record::{EnrichDefaults, ProcessContext, RecordEnricher};
use crate::sinks::{CsvFileSink, RecordSink};

/// Builder for [`Logger`].
///
/// ```no_run
/// use extlog::{Logger, MemoryRecordSink};
///
/// let store = MemoryRecordSink::new();
/// let mut log = Logger::builder("Order Sync")
///     .threshold(5)
///     .record_sink(store.clone())
///     .build()?;
/// log.debug("hello");
/// # Ok::<(), extlog::LoggerError>(())
/// ```
pub struct LoggerBuilder {
    extension_name: String,
    signature: Option<String>,
    script_start: Option<SystemTime>,
    threshold: ThresholdSetting,
    function_served: String,
    calling_file: String,
    config_store: Option<Arc<dyn ConfigStore>>,
    record_sink: Option<Box<dyn RecordSink>>,
    log_dir: Option<PathBuf>,
    reporter: ErrorReporter,
    context: Option<ProcessContext>,
}

impl LoggerBuilder {
    pub fn new(extension_name: impl Into<String>) -> Self {
        Self {
            extension_name: extension_name.into(),
            signature: None,
            script_start: None,
            threshold: ThresholdSetting::default(),
            function_served: NOT_SPECIFIED.to_string(),
            calling_file: NOT_SPECIFIED.to_string(),
            config_store: None,
            record_sink: None,
            log_dir: None,
            reporter: ErrorReporter::default(),
            context: None,
        }
    }

    /// Start from a `[logger]` settings section.
    pub fn from_settings(settings: &LoggerSettings) -> Self {
        let mut builder = Self::new(settings.extension_name.clone())
            .function_served(settings.function_served.clone())
            .calling_file(settings.calling_file.clone());
        builder.signature = settings.signature.clone();
        builder.threshold = settings.threshold.clone();
        builder.log_dir = settings.log_dir.clone();
        builder
    }

    /// Extension signature. Anything but 40 characters selects the generic logger.
    pub fn signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    /// Override the start time used for elapsed-time computation.
    pub fn script_start(mut self, start: SystemTime) -> Self {
        self.script_start = Some(start);
        self
    }

    /// Default severity for calls without one. Validated by [`build`](Self::build).
    pub fn threshold(mut self, threshold: i64) -> Self {
        self.threshold = ThresholdSetting::Code(threshold);
        self
    }

    /// Threshold given as text, e.g. `"warning"` or `"3"`.
    pub fn threshold_name(mut self, threshold: impl Into<String>) -> Self {
        self.threshold = ThresholdSetting::Name(threshold.into());
        self
    }

    pub fn function_served(mut self, description: impl Into<String>) -> Self {
        self.function_served = description.into();
        self
    }

    pub fn calling_file(mut self, label: impl Into<String>) -> Self {
        self.calling_file = label.into();
        self
    }

    /// Where extension records live. Defaults to a fresh in-memory store.
    pub fn config_store(mut self, store: Arc<dyn ConfigStore>) -> Self {
        self.config_store = Some(store);
        self
    }

    /// Record-store sink, gated by `log_to_database`.
    pub fn record_sink(mut self, sink: impl RecordSink + 'static) -> Self {
        self.record_sink = Some(Box::new(sink));
        self
    }

    /// Base directory for CSV logs. Without one there is no file sink.
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    pub fn error_reporter(mut self, reporter: ErrorReporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Fixed host/pid/uid instead of detecting them.
    pub fn process_context(mut self, context: ProcessContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Validate, resolve the extension, and bootstrap the log file.
    ///
    /// Fails only on an invalid threshold or a bootstrap error. Store
    /// failures are reported and the logger runs on defaults.
    pub fn build(self) -> LoggerResult<Logger> {
        let threshold = self.threshold.severity()?;

        let script_start = self.script_start.unwrap_or_else(SystemTime::now);
        let context = self.context.unwrap_or_else(ProcessContext::detect);

        let store: Arc<dyn ConfigStore> = self
            .config_store
            .unwrap_or_else(|| Arc::new(MemoryConfigStore::new()));
        let extension = ExtensionResolver::new(store.as_ref(), &self.reporter)
            .resolve(&self.extension_name, self.signature.as_deref());

        let log_paths = match self.log_dir.as_deref() {
            Some(dir) => Some(bootstrap_log_file(dir, &extension.name, Local::now().date_naive())?),
            None => None,
        };
        let file_sink = log_paths
            .as_ref()
            .map(|paths| Box::new(CsvFileSink::new(&paths.file)) as Box<dyn RecordSink>);

        let mut dispatcher = SinkDispatcher::new(self.record_sink, file_sink, self.reporter);
        dispatcher.attach(&extension);

        tracing::info!(
            extension = %extension.name,
            outcome = extension.outcome.as_str(),
            threshold = %threshold,
            log_file = ?log_paths.as_ref().map(|p| p.file.display().to_string()),
            "Logger initialized"
        );

        let enricher = RecordEnricher::new(
            EnrichDefaults {
                calling_file: self.calling_file,
                function_served: self.function_served,
                threshold,
            },
            context,
            script_start,
        );

        Ok(Logger::assemble(
            enricher,
            TraceBuffer::new(),
            dispatcher,
            extension,
            log_paths,
        ))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION_NAME)
    }
}
