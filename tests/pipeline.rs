//! End-to-end logging through resolution, enrichment, and both sinks.

use std::fs;
use std::time::{Duration, SystemTime};

use extlog::extension::ResolutionOutcome;
use extlog::record::HEADERS;
use extlog::{
    JsonConfigStore, JsonLinesRecordStore, LogCall, Logger, MemoryConfigStore, MemoryRecordSink,
    Severity,
};
use std::sync::Arc;

mod common;
use common::{context, store_with, SIG};

#[test]
fn test_debug_call_reaches_record_store() {
    let sink = MemoryRecordSink::new();
    let start = SystemTime::now() - Duration::from_secs(2);
    let mut log = Logger::builder("Test")
        .threshold(5)
        .script_start(start)
        .process_context(context())
        .record_sink(sink.clone())
        .build()
        .unwrap();

    log.debug("hello");

    let rows = sink.records();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.severity, Severity::Debug);
    assert_eq!(row.message, "hello");
    assert_eq!(row.detail, "hello");
    assert_eq!(row.host, "worker-7");
    assert_eq!(row.process_id, 31337);
    assert!(row.elapsed_millis >= 2000);
    assert_eq!(log.trace().len(), 1);
}

#[test]
fn test_truncation_and_cross_refs() {
    let sink = MemoryRecordSink::new();
    let mut log = Logger::builder("Test").record_sink(sink.clone()).build().unwrap();

    let long_path = format!("/srv/{}/job.rs", "d".repeat(300));
    log.log(
        LogCall::new("m".repeat(300))
            .function_name("f".repeat(300))
            .source_file(long_path.clone())
            .incident("INC-42"),
    );

    let row = &sink.records()[0];
    assert_eq!(row.message.chars().count(), 255);
    assert_eq!(row.function_name.chars().count(), 255);
    assert_eq!(row.source_file.chars().count(), 254);
    assert!(row.source_file.ends_with("/job.rs"));
    assert_eq!(row.detail, row.message);
    let refs = row.cross_refs.as_ref().unwrap();
    assert_eq!(refs.incident.as_deref(), Some("INC-42"));
    assert!(refs.contact.is_none());
}

#[test]
fn test_oversized_detail_is_replaced() {
    let mut log = Logger::new("Test", None, 5).unwrap();
    log.log(LogCall::new("big").detail("x".repeat(1_048_577)));
    assert_eq!(log.last_record().unwrap().detail, "x".repeat(255));

    log.log(LogCall::new("fits").detail("x".repeat(1_048_576)));
    assert_eq!(log.last_record().unwrap().detail.len(), 1_048_576);
}

#[test]
fn test_file_sink_writes_dated_csv() {
    let dir = tempfile::tempdir().unwrap();
    let mut log = Logger::builder("caller name")
        .signature(SIG)
        .config_store(store_with("Order Sync", r#"{"logToFile":"1","logThreshold":"3"}"#))
        .log_dir(dir.path())
        .process_context(context())
        .build()
        .unwrap();

    let file = log.log_file().unwrap().to_path_buf();
    assert_eq!(file.parent().unwrap(), dir.path().join("Order-Sync"));

    let warned = log.log(
        LogCall::new("disk, \"almost\" full")
            .severity(Severity::Warning)
            .incident("INC-1")
            .contact("ops"),
    );
    assert!(warned.filed);
    let skipped = log.log(LogCall::new("chatter").severity(Severity::Debug));
    assert!(!skipped.loggable);
    drop(log);

    let content = fs::read_to_string(&file).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], HEADERS.join(","));
    assert!(lines[1].contains(",3,\"disk, \"\"almost\"\" full\","));
    assert!(lines[1].contains(",worker-7,31337,"));
    assert!(lines[1].ends_with(",INC-1|ops"));
}

#[test]
fn test_header_written_once_per_file() {
    let dir = tempfile::tempdir().unwrap();
    for _ in 0..2 {
        let mut log = Logger::builder("Nightly")
            .log_dir(dir.path())
            .build()
            .unwrap();
        // generic config keeps file logging off
        assert!(!log.debug("x").filed);
    }

    let file = dir
        .path()
        .join("Nightly")
        .join(format!("{}.csv", chrono::Local::now().format("%Y-%m-%d")));
    let content = fs::read_to_string(file).unwrap();
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn test_unknown_signature_is_created_in_json_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("extensions.json");
    let records = dir.path().join("records.jsonl");

    {
        let store = Arc::new(JsonConfigStore::open(&path).unwrap());
        let mut log = Logger::builder("Billing")
            .signature(SIG)
            .config_store(store)
            .record_sink(JsonLinesRecordStore::open(&records).unwrap())
            .build()
            .unwrap();
        assert_eq!(log.extension().outcome, ResolutionOutcome::Created);
        log.log(LogCall::new("charged").severity(Severity::Notice));
    }

    let reopened = JsonConfigStore::open(&path).unwrap();
    let all = reopened.records();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Billing");

    let rows = JsonLinesRecordStore::tail(&records, 10).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].extension, "Billing");
    assert_eq!(rows[0].extension_id, Some(all[0].id));
    assert_eq!(rows[0].record.message, "charged");
}

#[test]
fn test_config_is_cached_for_logger_lifetime() {
    let store = Arc::new(MemoryConfigStore::new());
    let mut log = Logger::builder("Billing")
        .signature(SIG)
        .config_store(store.clone())
        .build()
        .unwrap();
    let reads = store.read_count();

    for i in 0..10 {
        log.debug(format!("event {}", i));
    }
    assert_eq!(store.read_count(), reads);
    assert_eq!(store.write_count(), 1);
}
