//! Error taxonomy for the logger.
//!
//! Only `Configuration` and `Bootstrap` ever escape `Logger` construction.
//! `Resolution` and `Dispatch` are recovered in place and handed to the
//! injected [`ErrorReporter`](crate::observability::ErrorReporter).

use std::path::PathBuf;

use thiserror::Error;

use crate::extension::StoreError;
use crate::sinks::SinkError;

/// Errors produced by the logging pipeline.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// Invalid threshold or settings. Fatal at construction.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The config store could not be read or written.
    #[error("Extension resolution failed for signature {signature}: {source}")]
    Resolution {
        signature: String,
        #[source]
        source: StoreError,
    },

    /// A sink rejected a batch.
    #[error("Dispatch to {sink} sink failed: {source}")]
    Dispatch {
        sink: &'static str,
        #[source]
        source: SinkError,
    },

    /// Log directory or file could not be created.
    #[error("Failed to create {path:?}: {source}")]
    Bootstrap {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoggerError {
    /// Whether this error aborts `Logger` construction.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LoggerError::Configuration(_) | LoggerError::Bootstrap { .. })
    }
}

/// Result type for logger operations.
pub type LoggerResult<T> = Result<T, LoggerError>;
