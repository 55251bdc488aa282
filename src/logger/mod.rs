//! Logger facade subsystem.
//!
//! # Data Flow
//! ```text
//! LoggerBuilder::build
//!     → threshold validated (fatal)
//!     → ExtensionResolver (store errors reported, never raised)
//!     → bootstrap_log_file when a log dir is set (fatal)
//!     → Logger
//!
//! Logger::log(call)
//!     → RecordEnricher (defaults, truncation, process context)
//!     → SinkDispatcher (threshold, then per-sink flags)
//!     → TraceBuffer (always)
//!
//! Logger::close / Drop
//!     → CLICK "Execution Completed" when logClicks is set, at most once
//! ```
//!
//! # Design Decisions
//! - The extension config is read once at construction and cached
//! - A `Logger` is single-owner; callers needing sharing wrap it themselves
//! - Only construction can fail

pub mod builder;
pub mod facade;

pub use builder::LoggerBuilder;
pub use facade::{Logger, COMPLETION_MESSAGE};
