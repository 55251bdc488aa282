//! In-process sink.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::record::LogRecord;
use crate::sinks::{RecordSink, SinkError};

/// Keeps every written record in a shared vector. Clones share storage, so a
/// clone handed to the logger can be inspected from outside.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordSink {
    records: Arc<Mutex<Vec<LogRecord>>>,
    batches: Arc<Mutex<usize>>,
}

impl MemoryRecordSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<LogRecord>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Copy of all records written so far.
    pub fn records(&self) -> Vec<LogRecord> {
        self.guard().clone()
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    /// Number of `write_batch` calls accepted.
    pub fn batch_count(&self) -> usize {
        *self.batches.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl RecordSink for MemoryRecordSink {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn write_batch(&mut self, records: &[LogRecord]) -> Result<(), SinkError> {
        self.guard().extend_from_slice(records);
        *self.batches.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }
}
