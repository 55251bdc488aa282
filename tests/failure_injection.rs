//! Failure handling: fatal construction errors and recovered runtime errors.

use std::sync::Arc;

use extlog::extension::{ConfigStore, ExtensionRecord, ResolutionOutcome, StoreError};
use extlog::{ExtensionConfig, LogCall, Logger, LoggerError, MemoryRecordSink, Severity};

mod common;
use common::{collecting_reporter, store_with, FailingSink, SIG};

struct DownStore;

impl ConfigStore for DownStore {
    fn find_by_signature(&self, _: &str) -> Result<Option<ExtensionRecord>, StoreError> {
        Err(StoreError::Unavailable("connection reset".into()))
    }

    fn create(&self, _: ExtensionRecord) -> Result<ExtensionRecord, StoreError> {
        Err(StoreError::Unavailable("connection reset".into()))
    }

    fn update(&self, _: &ExtensionRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection reset".into()))
    }
}

#[test]
fn test_store_outage_falls_back_to_defaults() {
    let (reporter, seen) = collecting_reporter();
    let sink = MemoryRecordSink::new();
    let mut log = Logger::builder("Billing")
        .signature(SIG)
        .config_store(Arc::new(DownStore))
        .record_sink(sink.clone())
        .error_reporter(reporter)
        .build()
        .unwrap();

    assert_eq!(log.extension().outcome, ResolutionOutcome::Failed);
    assert_eq!(*log.config(), ExtensionConfig::default());
    assert_eq!(seen.lock().unwrap().len(), 1);

    assert!(log.debug("still works").stored);
    assert_eq!(sink.len(), 1);
}

#[test]
fn test_sink_failure_is_reported_not_raised() {
    let (reporter, seen) = collecting_reporter();
    let mut log = Logger::builder("Billing")
        .record_sink(FailingSink)
        .error_reporter(reporter)
        .build()
        .unwrap();

    let outcome = log.log(LogCall::new("lost").severity(Severity::Fatal));
    assert!(outcome.loggable);
    assert!(!outcome.stored);
    assert_eq!(outcome.failures, 1);
    assert_eq!(log.trace().len(), 1);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].contains("disk quota exceeded"));
}

#[test]
fn test_log_dir_that_is_a_file_fails_construction() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let err = Logger::builder("Billing")
        .log_dir(file.path())
        .build()
        .unwrap_err();
    assert!(matches!(err, LoggerError::Bootstrap { .. }));
    assert!(err.is_fatal());
}

#[test]
fn test_invalid_threshold_rejected_before_store_access() {
    let store = store_with("Billing", "{}");
    let err = Logger::builder("Billing")
        .signature(SIG)
        .threshold(9)
        .config_store(store.clone())
        .build()
        .unwrap_err();
    assert!(matches!(err, LoggerError::Configuration(_)));
    assert_eq!(store.read_count(), 0);
}

#[test]
fn test_malformed_blob_uses_full_default() {
    let (reporter, seen) = collecting_reporter();
    let log = Logger::builder("Billing")
        .signature(SIG)
        .config_store(store_with("Billing", "{not json"))
        .error_reporter(reporter)
        .build()
        .unwrap();

    assert_eq!(log.extension().outcome, ResolutionOutcome::Found);
    assert_eq!(*log.config(), ExtensionConfig::default());
    assert_eq!(seen.lock().unwrap().len(), 1);
}
