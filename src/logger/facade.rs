//! The logger facade.

use std::path::Path;
use std::time::SystemTime;

use crate::config::ExtensionConfig;
use crate::error::LoggerResult;
use crate::extension::ResolvedExtension;
use crate::lifecycle::LogPaths;
use crate::logger::builder::LoggerBuilder;
use crate::observability::metrics;
use crate::pipeline::{DispatchOutcome, SinkDispatcher, TraceBuffer};
use crate::record::{LogCall, LogRecord, RecordEnricher, Severity};

/// Message of the record written at teardown when click logging is on.
pub const COMPLETION_MESSAGE: &str = "Execution Completed";

/// Extension-grouped leveled logger.
///
/// Owns its trace buffer and sinks; use one per thread of work. Logging
/// never fails: sink errors go to the configured
/// [`ErrorReporter`](crate::observability::ErrorReporter).
pub struct Logger {
    enricher: RecordEnricher,
    trace: TraceBuffer,
    dispatcher: SinkDispatcher,
    extension: ResolvedExtension,
    log_paths: Option<LogPaths>,
    closed: bool,
}

impl Logger {
    pub fn builder(extension_name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(extension_name)
    }

    /// Logger with an in-memory config store and no sinks beyond the trace.
    pub fn new(extension_name: &str, signature: Option<&str>, threshold: i64) -> LoggerResult<Self> {
        let mut builder = LoggerBuilder::new(extension_name).threshold(threshold);
        if let Some(signature) = signature {
            builder = builder.signature(signature);
        }
        builder.build()
    }

    pub(crate) fn assemble(
        enricher: RecordEnricher,
        trace: TraceBuffer,
        dispatcher: SinkDispatcher,
        extension: ResolvedExtension,
        log_paths: Option<LogPaths>,
    ) -> Self {
        Self {
            enricher,
            trace,
            dispatcher,
            extension,
            log_paths,
            closed: false,
        }
    }

    /// Record one event.
    ///
    /// The enriched record always lands in the trace buffer. It reaches
    /// the sinks only if it passes the extension threshold.
    pub fn log(&mut self, call: impl Into<LogCall>) -> DispatchOutcome {
        self.emit(None, call.into(), SystemTime::now())
    }

    /// Like [`log`](Self::log) with an explicit clock.
    pub fn log_at(&mut self, call: impl Into<LogCall>, now: SystemTime) -> DispatchOutcome {
        self.emit(None, call.into(), now)
    }

    // The per-severity entry points share one path. A call without an
    // explicit severity is recorded at the logger threshold; the entry
    // point only labels the diagnostic event.

    pub fn fatal(&mut self, call: impl Into<LogCall>) -> DispatchOutcome {
        self.emit(Some(Severity::Fatal), call.into(), SystemTime::now())
    }

    pub fn error(&mut self, call: impl Into<LogCall>) -> DispatchOutcome {
        self.emit(Some(Severity::Error), call.into(), SystemTime::now())
    }

    pub fn warning(&mut self, call: impl Into<LogCall>) -> DispatchOutcome {
        self.emit(Some(Severity::Warning), call.into(), SystemTime::now())
    }

    pub fn notice(&mut self, call: impl Into<LogCall>) -> DispatchOutcome {
        self.emit(Some(Severity::Notice), call.into(), SystemTime::now())
    }

    pub fn debug(&mut self, call: impl Into<LogCall>) -> DispatchOutcome {
        self.emit(Some(Severity::Debug), call.into(), SystemTime::now())
    }

    pub fn click(&mut self, call: impl Into<LogCall>) -> DispatchOutcome {
        self.emit(Some(Severity::Click), call.into(), SystemTime::now())
    }

    fn emit(&mut self, via: Option<Severity>, call: LogCall, now: SystemTime) -> DispatchOutcome {
        let record = self.enricher.build_at(call, now);
        metrics::record_logged(record.severity);
        self.trace.push(record);

        let Some(record) = self.trace.latest() else {
            return DispatchOutcome::default();
        };
        let outcome = self.dispatcher.dispatch(record, &self.extension.config);
        tracing::trace!(
            extension = %self.extension.name,
            via = via.map(Severity::as_str).unwrap_or("log"),
            severity = %record.severity,
            loggable = outcome.loggable,
            stored = outcome.stored,
            filed = outcome.filed,
            message = %record.message,
            "Record logged"
        );
        outcome
    }

    /// Recent records, oldest first, regardless of threshold.
    pub fn trace(&self) -> &TraceBuffer {
        &self.trace
    }

    /// Most recent record.
    pub fn last_record(&self) -> Option<&LogRecord> {
        self.trace.latest()
    }

    pub fn extension(&self) -> &ResolvedExtension {
        &self.extension
    }

    /// Extension config cached at construction.
    pub fn config(&self) -> &ExtensionConfig {
        &self.extension.config
    }

    /// Severity used for calls that omit one.
    pub fn threshold(&self) -> Severity {
        self.enricher.defaults().threshold
    }

    pub fn log_paths(&self) -> Option<&LogPaths> {
        self.log_paths.as_ref()
    }

    /// CSV file for today's records, if a log directory was configured.
    pub fn log_file(&self) -> Option<&Path> {
        self.log_paths.as_ref().map(|p| p.file.as_path())
    }

    /// Run teardown now and hand back the trace buffer.
    pub fn close(mut self) -> TraceBuffer {
        self.teardown();
        std::mem::take(&mut self.trace)
    }

    fn teardown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if self.extension.config.log_clicks {
            let call = LogCall::new(COMPLETION_MESSAGE).severity(Severity::Click);
            self.emit(None, call, SystemTime::now());
        }
        tracing::debug!(
            extension = %self.extension.name,
            records = self.trace.len(),
            "Logger closed"
        );
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("extension", &self.extension.name)
            .field("outcome", &self.extension.outcome)
            .field("threshold", &self.threshold())
            .field("trace_len", &self.trace.len())
            .field("closed", &self.closed)
            .finish()
    }
}
