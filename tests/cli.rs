//! The `extlog` binary against on-disk stores.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use extlog::JsonLinesRecordStore;

mod common;
use common::SIG;

fn write_settings(dir: &Path) -> std::path::PathBuf {
    let settings = format!(
        "[logger]\nextension_name = 'Billing'\nsignature = '{}'\nlog_dir = '{}'\n\n\
         [storage]\nextensions_path = '{}'\nrecords_path = '{}'\n",
        SIG,
        dir.join("logs").display(),
        dir.join("extensions.json").display(),
        dir.join("records.jsonl").display(),
    );
    let path = dir.join("extlog.toml");
    fs::write(&path, settings).unwrap();
    path
}

fn extlog(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_extlog"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_log_with_truncated_store_still_writes_record() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_settings(dir.path());
    let damaged = r#"[{"id":1,"name":"Billing","sig"#;
    fs::write(dir.path().join("extensions.json"), damaged).unwrap();

    let out = extlog(&config, &["log", "--level", "fatal", "store is down"]);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(out.status.success(), "stderr: {}", stderr);
    assert!(stderr.contains("EOF while parsing"), "stderr: {}", stderr);
    // recovered errors go through the tracing subscriber, not a bare eprintln
    assert!(stderr.contains("extlog internal error"), "stderr: {}", stderr);
    assert!(stderr.contains("Extension resolution failed"), "stderr: {}", stderr);
    assert!(!stderr.contains("extlog: Extension"), "stderr: {}", stderr);

    let rows = JsonLinesRecordStore::tail(dir.path().join("records.jsonl"), 10).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].record.message, "store is down");
    assert_eq!(rows[0].extension_id, None);

    // no fresh record was created over the damaged file
    assert_eq!(fs::read_to_string(dir.path().join("extensions.json")).unwrap(), damaged);
}

#[test]
fn test_show_with_truncated_store_reports_failed_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_settings(dir.path());
    fs::write(dir.path().join("extensions.json"), "[{").unwrap();

    let out = extlog(&config, &["show"]);
    assert!(out.status.success());
    let view: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(view["outcome"], "failed");
    assert_eq!(view["config"]["logThreshold"], 5);
}

#[test]
fn test_log_creates_extension_on_first_use() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_settings(dir.path());

    let out = extlog(&config, &["log", "hello"]);
    assert!(out.status.success());

    let stored = fs::read_to_string(dir.path().join("extensions.json")).unwrap();
    let records: Vec<serde_json::Value> = serde_json::from_str(&stored).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "Billing");
    assert!(!dir.path().join("extensions.json.tmp").exists());
}
