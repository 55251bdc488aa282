//! Settings validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Resolve the threshold setting to a [`Severity`]
//! - Check that required strings and paths are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: `&Settings → Result<(), Vec<ValidationError>>`

use std::fmt;

use crate::config::schema::{Settings, ThresholdSetting};
use crate::error::{LoggerError, LoggerResult};
use crate::record::Severity;

/// A single semantic problem in the settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ThresholdSetting {
    /// Interpret the setting as a severity.
    pub fn severity(&self) -> LoggerResult<Severity> {
        match self {
            ThresholdSetting::Code(code) => Severity::threshold(*code),
            ThresholdSetting::Name(name) => name.parse::<Severity>(),
        }
    }

    /// [`severity`](Self::severity) as a field-tagged validation error.
    pub fn to_severity(&self) -> Result<Severity, ValidationError> {
        self.severity().map_err(|e| ValidationError {
            field: "logger.threshold",
            message: match e {
                LoggerError::Configuration(message) => message,
                other => other.to_string(),
            },
        })
    }
}

/// Check the settings, collecting every error.
pub fn validate_settings(settings: &Settings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = settings.logger.threshold.to_severity() {
        errors.push(e);
    }

    if settings.logger.extension_name.trim().is_empty() {
        errors.push(ValidationError {
            field: "logger.extension_name",
            message: "must not be empty".to_string(),
        });
    }

    if settings.storage.extensions_path.as_os_str().is_empty() {
        errors.push(ValidationError {
            field: "storage.extensions_path",
            message: "must not be empty".to_string(),
        });
    }

    if settings.storage.records_path.as_os_str().is_empty() {
        errors.push(ValidationError {
            field: "storage.records_path",
            message: "must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
