//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Pipeline stages produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters)
//!     → diagnostics.rs (recovered errors, via the injected ErrorReporter)
//! ```
//!
//! # Design Decisions
//! - Internal diagnostics go through `tracing`, never through the logger itself
//! - No process-wide error hook; each Logger carries its own reporter
//! - Metrics are cheap and are no-ops until a recorder is installed

pub mod diagnostics;
pub mod logging;
pub mod metrics;

pub use diagnostics::ErrorReporter;
