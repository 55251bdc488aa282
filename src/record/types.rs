//! Log record and call types.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::record::severity::Severity;

/// Column headers for tabular sinks, in output order.
pub const HEADERS: [&str; 12] = [
    "Time",
    "File",
    "Function",
    "MsgType",
    "Message",
    "Host",
    "PID",
    "Detail",
    "UID",
    "TimeElapsed",
    "Peak",
    "xRefs",
];

/// Timestamp format used in CSV rows.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Links from a record to external business entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossRefs {
    /// Opaque incident reference.
    pub incident: Option<String>,
    /// Opaque contact reference.
    pub contact: Option<String>,
}

impl CrossRefs {
    /// Returns `None` when neither reference is present.
    pub fn from_parts(incident: Option<String>, contact: Option<String>) -> Option<Self> {
        if incident.is_none() && contact.is_none() {
            None
        } else {
            Some(Self { incident, contact })
        }
    }

    /// `incident|contact`, empty on the missing side.
    pub fn to_column(&self) -> String {
        format!(
            "{}|{}",
            self.incident.as_deref().unwrap_or(""),
            self.contact.as_deref().unwrap_or("")
        )
    }
}

/// A fully enriched log event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Wall clock time, second resolution.
    pub timestamp: DateTime<Local>,
    pub source_file: String,
    pub function_name: String,
    pub severity: Severity,
    pub message: String,
    pub detail: String,
    pub host: String,
    pub process_id: u32,
    pub user_id: String,
    pub elapsed_millis: u64,
    pub peak_memory_kb: u64,
    pub cross_refs: Option<CrossRefs>,
}

impl LogRecord {
    /// Values in [`HEADERS`] order.
    pub fn columns(&self) -> [String; 12] {
        [
            self.timestamp.format(TIME_FORMAT).to_string(),
            self.source_file.clone(),
            self.function_name.clone(),
            self.severity.code().to_string(),
            self.message.clone(),
            self.host.clone(),
            self.process_id.to_string(),
            self.detail.clone(),
            self.user_id.clone(),
            self.elapsed_millis.to_string(),
            self.peak_memory_kb.to_string(),
            self.cross_refs
                .as_ref()
                .map(CrossRefs::to_column)
                .unwrap_or_default(),
        ]
    }
}

/// A partial record as supplied by the caller.
///
/// Only `message` is required. Zero/empty overrides are treated the same as
/// absent ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogCall {
    pub message: String,
    pub detail: Option<String>,
    pub incident: Option<String>,
    pub contact: Option<String>,
    pub source_file: Option<String>,
    pub function_name: Option<String>,
    pub elapsed_millis: Option<u64>,
    pub severity: Option<Severity>,
    pub host: Option<String>,
    pub process_id: Option<u32>,
}

impl LogCall {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn incident(mut self, incident: impl Into<String>) -> Self {
        self.incident = Some(incident.into());
        self
    }

    pub fn contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    pub fn source_file(mut self, file: impl Into<String>) -> Self {
        self.source_file = Some(file.into());
        self
    }

    pub fn function_name(mut self, function: impl Into<String>) -> Self {
        self.function_name = Some(function.into());
        self
    }

    /// Fixed elapsed time, useful for benchmarking a block.
    pub fn elapsed_millis(mut self, millis: u64) -> Self {
        self.elapsed_millis = Some(millis);
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn process_id(mut self, pid: u32) -> Self {
        self.process_id = Some(pid);
        self
    }
}

impl From<&str> for LogCall {
    fn from(message: &str) -> Self {
        LogCall::new(message)
    }
}

impl From<String> for LogCall {
    fn from(message: String) -> Self {
        LogCall::new(message)
    }
}
