//! Extension-grouped leveled logger.
//!
//! Records carry a severity, message and optional detail, are enriched with
//! process context, kept in a bounded trace buffer, and routed to a record
//! store and a dated CSV file according to a per-extension configuration.

// Record model
pub mod error;
pub mod record;

// Configuration and identity
pub mod config;
pub mod extension;

// Output
pub mod pipeline;
pub mod sinks;

// Cross-cutting concerns
pub mod lifecycle;
pub mod logger;
pub mod observability;

pub use config::{ExtensionConfig, Settings};
pub use error::{LoggerError, LoggerResult};
pub use extension::{ConfigStore, JsonConfigStore, MemoryConfigStore, ResolvedExtension};
pub use logger::{Logger, LoggerBuilder};
pub use observability::ErrorReporter;
pub use pipeline::{DispatchOutcome, TraceBuffer};
pub use record::{LogCall, LogRecord, Severity};
pub use sinks::{CsvFileSink, JsonLinesRecordStore, MemoryRecordSink, RecordSink};
