//! Fallback channel for recovered errors.

use std::fmt;
use std::sync::Arc;

use crate::error::LoggerError;

type ReportFn = dyn Fn(&LoggerError) + Send + Sync;

/// Receives every error the pipeline swallows.
///
/// Injected at `Logger` construction. The default reporter emits a
/// `tracing` error event.
#[derive(Clone)]
pub struct ErrorReporter {
    inner: Arc<ReportFn>,
}

impl ErrorReporter {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&LoggerError) + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Reporter that forwards to `tracing::error!`.
    pub fn tracing() -> Self {
        Self::new(|err| {
            tracing::error!(error = %err, fatal = err.is_fatal(), "extlog internal error");
        })
    }

    /// Reporter that prints to stderr.
    pub fn stderr() -> Self {
        Self::new(|err| eprintln!("extlog: {}", err))
    }

    pub fn report(&self, err: &LoggerError) {
        (self.inner)(err);
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::tracing()
    }
}

impl fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorReporter").finish_non_exhaustive()
    }
}
