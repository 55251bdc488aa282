//! Record sinks.
//!
//! # Responsibilities
//! - Accept batches of enriched records and persist them
//! - Report failures as [`SinkError`]; the dispatcher decides what to do
//!
//! # Implementations
//! - `csv_file.rs`: dated CSV file under the extension's log directory
//! - `record_store.rs`: JSON-lines record store stamped with the extension
//! - `memory.rs`: shared in-process buffer

use thiserror::Error;

use crate::extension::ResolvedExtension;
use crate::record::LogRecord;

pub mod csv_file;
pub mod memory;
pub mod record_store;

pub use csv_file::CsvFileSink;
pub use memory::MemoryRecordSink;
pub use record_store::{JsonLinesRecordStore, StoredRecord};

/// Errors from a sink write.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("sink rejected batch: {0}")]
    Rejected(String),
}

/// A backend that persists log records.
pub trait RecordSink: Send {
    /// Short label for diagnostics and metrics.
    fn name(&self) -> &'static str;

    /// Called once with the resolved extension before any write.
    fn attach(&mut self, _extension: &ResolvedExtension) {}

    /// Persist `records` in order.
    fn write_batch(&mut self, records: &[LogRecord]) -> Result<(), SinkError>;
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn attach(&mut self, extension: &ResolvedExtension) {
        (**self).attach(extension)
    }

    fn write_batch(&mut self, records: &[LogRecord]) -> Result<(), SinkError> {
        (**self).write_batch(records)
    }
}
