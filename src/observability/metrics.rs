//! Metrics collection.
//!
//! # Metrics
//! - `extlog_records_total` (counter): records built, by severity
//! - `extlog_dispatch_total` (counter): batches accepted, by sink
//! - `extlog_dispatch_failures_total` (counter): batches rejected, by sink
//! - `extlog_resolutions_total` (counter): extension resolutions, by outcome

use crate::extension::ResolutionOutcome;
use crate::record::Severity;

pub fn record_logged(severity: Severity) {
    metrics::counter!("extlog_records_total", "severity" => severity.as_str()).increment(1);
}

pub fn record_dispatched(sink: &'static str) {
    metrics::counter!("extlog_dispatch_total", "sink" => sink).increment(1);
}

pub fn record_dispatch_failure(sink: &'static str) {
    metrics::counter!("extlog_dispatch_failures_total", "sink" => sink).increment(1);
}

pub fn record_resolution(outcome: ResolutionOutcome) {
    metrics::counter!("extlog_resolutions_total", "outcome" => outcome.as_str()).increment(1);
}
