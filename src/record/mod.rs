//! Log records and their enrichment.
//!
//! # Data Flow
//! ```text
//! LogCall (message + optional overrides)
//!     → enricher.rs (defaults, truncation, process context)
//!     → LogRecord (every field populated)
//! ```

pub mod enricher;
pub mod process;
pub mod severity;
pub mod truncate;
pub mod types;

pub use enricher::{EnrichDefaults, RecordEnricher};
pub use process::ProcessContext;
pub use severity::Severity;
pub use types::{CrossRefs, LogCall, LogRecord, HEADERS};
