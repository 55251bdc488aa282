//! Shared helpers for integration tests.

use std::sync::{Arc, Mutex};

use extlog::extension::{ExtensionRecord, MemoryConfigStore};
use extlog::record::ProcessContext;
use extlog::sinks::SinkError;
use extlog::{ErrorReporter, LogRecord, RecordSink};

/// A valid 40-character signature.
pub const SIG: &str = "0123456789abcdef0123456789abcdef01234567";

#[allow(dead_code)]
pub fn context() -> ProcessContext {
    ProcessContext {
        host: "worker-7".into(),
        process_id: 31337,
        user_id: "1000".into(),
    }
}

/// Store holding one extension under [`SIG`] with the given config blob.
#[allow(dead_code)]
pub fn store_with(name: &str, blob: &str) -> Arc<MemoryConfigStore> {
    Arc::new(MemoryConfigStore::with_records([ExtensionRecord {
        id: 9,
        name: name.into(),
        signature: SIG.into(),
        description: "Integration fixture".into(),
        authors: "tests".into(),
        config_blob: Some(blob.into()),
    }]))
}

/// Reporter that keeps every error message.
#[allow(dead_code)]
pub fn collecting_reporter() -> (ErrorReporter, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let reporter = ErrorReporter::new(move |e| sink.lock().unwrap().push(e.to_string()));
    (reporter, seen)
}

/// Sink that rejects every batch.
#[allow(dead_code)]
pub struct FailingSink;

impl RecordSink for FailingSink {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn write_batch(&mut self, _records: &[LogRecord]) -> Result<(), SinkError> {
        Err(SinkError::Rejected("disk quota exceeded".into()))
    }
}
