//! Per-extension configuration and its stored blob format.
//!
//! The blob is a JSON object with four recognized keys. Values may be
//! native JSON (`true`, `5`) or quoted strings (`"1"`, `"5"`). The
//! `logtoFile`/`logtoDatabase` spellings are accepted as aliases.
//!
//! ```json
//! { "logToFile": false, "logToDatabase": true, "logThreshold": 5, "logClicks": false }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::record::Severity;

/// Where and how much an extension logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionConfig {
    /// Append loggable records to the dated CSV file.
    pub log_to_file: bool,
    /// Forward loggable records to the record store.
    pub log_to_database: bool,
    /// Highest severity number that is persisted.
    pub log_threshold: Severity,
    /// Emit a CLICK record on teardown.
    pub log_clicks: bool,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            log_to_file: false,
            log_to_database: true,
            log_threshold: Severity::Debug,
            log_clicks: false,
        }
    }
}

/// A stored blob that isn't a JSON object.
#[derive(Debug, Error)]
pub enum BlobError {
    #[error("config blob is empty")]
    Empty,

    #[error("config blob is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config blob is not an object (found {0})")]
    NotObject(&'static str),
}

impl ExtensionConfig {
    /// Parse a stored blob, filling each missing or unreadable key with its
    /// default. Fails only when the blob as a whole is unusable.
    pub fn from_blob(blob: &str) -> Result<Self, BlobError> {
        if blob.trim().is_empty() {
            return Err(BlobError::Empty);
        }
        match serde_json::from_str::<Value>(blob)? {
            Value::Object(map) => Ok(Self::merge_with_defaults(&map)),
            other => Err(BlobError::NotObject(json_kind(&other))),
        }
    }

    /// Like [`from_blob`](Self::from_blob) but an unusable blob yields the
    /// full default config.
    pub fn merge_blob(blob: Option<&str>) -> Self {
        blob.and_then(|b| Self::from_blob(b).ok()).unwrap_or_default()
    }

    /// Key-by-key merge over [`ExtensionConfig::default`].
    pub fn merge_with_defaults(map: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            log_to_file: lookup(map, &["logToFile", "logtoFile"])
                .and_then(parse_flag)
                .unwrap_or(defaults.log_to_file),
            log_to_database: lookup(map, &["logToDatabase", "logtoDatabase"])
                .and_then(parse_flag)
                .unwrap_or(defaults.log_to_database),
            log_threshold: lookup(map, &["logThreshold"])
                .and_then(parse_severity)
                .unwrap_or(defaults.log_threshold),
            log_clicks: lookup(map, &["logClicks"])
                .and_then(parse_flag)
                .unwrap_or(defaults.log_clicks),
        }
    }

    /// Serialize for storage.
    pub fn to_blob(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

fn lookup<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|k| map.get(*k)).filter(|v| !v.is_null())
}

fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" | "" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn parse_severity(value: &Value) -> Option<Severity> {
    let code = match value {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    Severity::from_code(code)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
