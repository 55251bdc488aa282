//! Per-record pipeline stages after enrichment.
//!
//! # Data Flow
//! ```text
//! LogRecord
//!     → trace_buffer.rs (always retained, last 50)
//!     → dispatcher.rs (threshold gate, then per-sink flags)
//!     → RecordSink::write_batch (one-record batches)
//! ```

pub mod dispatcher;
pub mod trace_buffer;

pub use dispatcher::{DispatchOutcome, SinkDispatcher};
pub use trace_buffer::{TraceBuffer, TRACE_CAPACITY};
