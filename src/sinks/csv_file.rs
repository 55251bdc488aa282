//! CSV file sink.

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::record::{LogRecord, HEADERS};
use crate::sinks::{RecordSink, SinkError};

/// Appends records to one CSV file. The file and its header row are created
/// by [`bootstrap_log_file`](crate::lifecycle::bootstrap_log_file).
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    path: PathBuf,
}

impl CsvFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for CsvFileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    fn write_batch(&mut self, records: &[LogRecord]) -> Result<(), SinkError> {
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut writer = BufWriter::new(file);
        for record in records {
            writer.write_all(csv_row(&record.columns()).as_bytes())?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// The header line, newline terminated.
pub fn header_row() -> String {
    csv_row(&HEADERS)
}

/// Join fields into one RFC 4180 line.
pub fn csv_row<S: AsRef<str>>(fields: &[S]) -> String {
    let mut line = fields
        .iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}

/// Quote a field when it contains a delimiter, quote, or line break.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CrossRefs, Severity};
    use chrono::{Local, TimeZone};

    fn record(message: &str) -> LogRecord {
        LogRecord {
            timestamp: Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap(),
            source_file: "sync.rs".into(),
            function_name: "import".into(),
            severity: Severity::Error,
            message: message.into(),
            detail: message.into(),
            host: "h".into(),
            process_id: 5,
            user_id: "1000".into(),
            elapsed_millis: 12,
            peak_memory_kb: 640,
            cross_refs: CrossRefs::from_parts(Some("I-1".into()), Some("C-2".into())),
        }
    }

    #[test]
    fn test_header_row() {
        assert_eq!(
            header_row(),
            "Time,File,Function,MsgType,Message,Host,PID,Detail,UID,TimeElapsed,Peak,xRefs\n"
        );
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_appends_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("2024-03-09.csv");
        let mut sink = CsvFileSink::new(&path);

        sink.write_batch(&[record("first")]).unwrap();
        sink.write_batch(&[record("second, with comma")]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "2024-03-09 14:05:07,sync.rs,import,2,first,h,5,first,1000,12,640,I-1|C-2"
        );
        assert!(lines[1].contains("\"second, with comma\""));
    }
}
