//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (LoggerBuilder::build):
//!     Validate threshold → Resolve extension → bootstrap.rs → Attach sinks
//!
//! Teardown (Logger::close / drop):
//!     log_clicks enabled → one CLICK "Execution Completed" record
//! ```
//!
//! # Design Decisions
//! - Ordered startup: validation first, filesystem last
//! - Teardown runs exactly once

pub mod bootstrap;

pub use bootstrap::{bootstrap_log_file, sanitize_dir_name, LogPaths};
