//! Record enrichment.
//!
//! Turns a caller's [`LogCall`] into a complete [`LogRecord`]: every field
//! is filled from the call, from the logger-level defaults, or from the
//! process context captured at construction.

use std::time::SystemTime;

use chrono::{DateTime, Local, SubsecRound};

use crate::record::process::{self, ProcessContext};
use crate::record::severity::Severity;
use crate::record::truncate;
use crate::record::types::{CrossRefs, LogCall, LogRecord};

/// Logger-level defaults for omitted call fields.
#[derive(Debug, Clone)]
pub struct EnrichDefaults {
    /// Used when the call has no source file.
    pub calling_file: String,
    /// Used when the call has no function name.
    pub function_served: String,
    /// Used when the call has no severity.
    pub threshold: Severity,
}

/// Builds enriched records.
#[derive(Debug, Clone)]
pub struct RecordEnricher {
    defaults: EnrichDefaults,
    context: ProcessContext,
    script_start: SystemTime,
}

impl RecordEnricher {
    pub fn new(defaults: EnrichDefaults, context: ProcessContext, script_start: SystemTime) -> Self {
        Self {
            defaults,
            context,
            script_start,
        }
    }

    pub fn defaults(&self) -> &EnrichDefaults {
        &self.defaults
    }

    pub fn context(&self) -> &ProcessContext {
        &self.context
    }

    pub fn script_start(&self) -> SystemTime {
        self.script_start
    }

    /// Build a record stamped with the current time.
    pub fn build(&self, call: LogCall) -> LogRecord {
        self.build_at(call, SystemTime::now())
    }

    /// Build a record as of `now`.
    pub fn build_at(&self, call: LogCall, now: SystemTime) -> LogRecord {
        let LogCall {
            message,
            detail,
            incident,
            contact,
            source_file,
            function_name,
            elapsed_millis,
            severity,
            host,
            process_id,
        } = call;

        let message = truncate::message(&message);
        let detail = match detail {
            Some(detail) => truncate::detail(detail),
            None => message.clone(),
        };

        let source_file = truncate::source_file(
            source_file.as_deref().unwrap_or(&self.defaults.calling_file),
        );
        let function_name = truncate::function_name(
            function_name
                .as_deref()
                .unwrap_or(&self.defaults.function_served),
        );

        let elapsed_millis = match elapsed_millis {
            Some(millis) if millis != 0 => millis,
            _ => self.elapsed_since_start(now),
        };

        // An omitted severity takes the logger threshold, not a fixed level.
        let severity = severity.unwrap_or(self.defaults.threshold);

        let host = host
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| self.context.host.clone());
        let process_id = process_id
            .filter(|pid| *pid != 0)
            .unwrap_or(self.context.process_id);

        LogRecord {
            timestamp: DateTime::<Local>::from(now).trunc_subsecs(0),
            source_file,
            function_name,
            severity,
            message,
            detail,
            host,
            process_id,
            user_id: self.context.user_id.clone(),
            elapsed_millis,
            peak_memory_kb: process::peak_memory_kb(),
            cross_refs: CrossRefs::from_parts(incident, contact),
        }
    }

    fn elapsed_since_start(&self, now: SystemTime) -> u64 {
        let elapsed = now
            .duration_since(self.script_start)
            .unwrap_or_default()
            .as_secs_f64();
        (elapsed * 1000.0).round() as u64
    }
}
