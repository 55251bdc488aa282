//! Threshold filtering and sink fan-out.

use crate::config::ExtensionConfig;
use crate::error::LoggerError;
use crate::extension::ResolvedExtension;
use crate::observability::{metrics, ErrorReporter};
use crate::record::LogRecord;
use crate::sinks::RecordSink;

/// What happened to one record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// The record passed the extension threshold.
    pub loggable: bool,
    /// Accepted by the record-store sink.
    pub stored: bool,
    /// Accepted by the file sink.
    pub filed: bool,
    /// Sinks that failed.
    pub failures: usize,
}

/// Routes records to the record-store and file sinks.
///
/// Both paths are gated by the threshold; each is then switched by its own
/// config flag. Failures are reported, never returned.
pub struct SinkDispatcher {
    store: Option<Box<dyn RecordSink>>,
    file: Option<Box<dyn RecordSink>>,
    reporter: ErrorReporter,
}

impl SinkDispatcher {
    pub fn new(
        store: Option<Box<dyn RecordSink>>,
        file: Option<Box<dyn RecordSink>>,
        reporter: ErrorReporter,
    ) -> Self {
        Self {
            store,
            file,
            reporter,
        }
    }

    /// Hand the resolved extension to every sink.
    pub fn attach(&mut self, extension: &ResolvedExtension) {
        if let Some(sink) = self.store.as_mut() {
            sink.attach(extension);
        }
        if let Some(sink) = self.file.as_mut() {
            sink.attach(extension);
        }
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    pub fn has_file(&self) -> bool {
        self.file.is_some()
    }

    pub fn dispatch(&mut self, record: &LogRecord, config: &ExtensionConfig) -> DispatchOutcome {
        let mut outcome = DispatchOutcome {
            loggable: record.severity.is_loggable(config.log_threshold),
            ..DispatchOutcome::default()
        };
        if !outcome.loggable {
            return outcome;
        }

        if config.log_to_database {
            match write_one(self.store.as_mut(), record, &self.reporter) {
                Some(true) => outcome.stored = true,
                Some(false) => outcome.failures += 1,
                None => {}
            }
        }

        if config.log_to_file {
            match write_one(self.file.as_mut(), record, &self.reporter) {
                Some(true) => outcome.filed = true,
                Some(false) => outcome.failures += 1,
                None => {}
            }
        }

        outcome
    }
}

/// `None` if there is no sink, else whether the write succeeded.
fn write_one(
    sink: Option<&mut Box<dyn RecordSink>>,
    record: &LogRecord,
    reporter: &ErrorReporter,
) -> Option<bool> {
    let sink = sink?;
    let name = sink.name();
    match sink.write_batch(std::slice::from_ref(record)) {
        Ok(()) => {
            metrics::record_dispatched(name);
            Some(true)
        }
        Err(source) => {
            metrics::record_dispatch_failure(name);
            reporter.report(&LoggerError::Dispatch { sink: name, source });
            Some(false)
        }
    }
}
