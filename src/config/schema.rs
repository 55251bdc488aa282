//! Settings file schema.
//!
//! All sections carry defaults so a minimal (or empty) TOML file is valid.
//!
//! ```toml
//! [logger]
//! extension_name = "Order Sync"
//! signature = "0123456789abcdef0123456789abcdef01234567"
//! threshold = "warning"
//! log_dir = "/var/log/extlog"
//!
//! [storage]
//! extensions_path = "extensions.json"
//! records_path = "records.jsonl"
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Extension name used when none is given.
pub const DEFAULT_EXTENSION_NAME: &str = "extlog";

/// Placeholder for unset descriptive fields.
pub const NOT_SPECIFIED: &str = "Not Specified";

/// Root settings for the `extlog` binary.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Logger construction parameters.
    pub logger: LoggerSettings,

    /// Paths of the local stores.
    pub storage: StorageSettings,

    /// Diagnostic output.
    pub observability: ObservabilitySettings,
}

/// A threshold as written in the file: a number or a level name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ThresholdSetting {
    Code(i64),
    Name(String),
}

impl Default for ThresholdSetting {
    fn default() -> Self {
        ThresholdSetting::Code(5)
    }
}

/// Logger construction parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerSettings {
    /// Logical extension the records are grouped under.
    pub extension_name: String,

    /// 40-character extension signature. Anything else means the generic logger.
    pub signature: Option<String>,

    /// Default severity for calls that don't give one.
    pub threshold: ThresholdSetting,

    /// Human readable description of what the caller does.
    pub function_served: String,

    /// Label of the calling file.
    pub calling_file: String,

    /// Base directory for CSV logs. `None` disables the file sink.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            extension_name: DEFAULT_EXTENSION_NAME.to_string(),
            signature: None,
            threshold: ThresholdSetting::default(),
            function_served: NOT_SPECIFIED.to_string(),
            calling_file: NOT_SPECIFIED.to_string(),
            log_dir: Some(std::env::temp_dir().join("extlog")),
        }
    }
}

/// Local store locations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageSettings {
    /// JSON file holding extension records.
    pub extensions_path: PathBuf,

    /// JSON-lines file receiving record-store writes.
    pub records_path: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            extensions_path: PathBuf::from("extensions.json"),
            records_path: PathBuf::from("records.jsonl"),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilitySettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilitySettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
