//! JSON-lines record store.
//!
//! Each record becomes one line, stamped with the extension it was logged
//! under:
//!
//! ```json
//! {"extension_id":3,"extension":"Order Sync","timestamp":"...","severity":2,...}
//! ```

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::extension::ResolvedExtension;
use crate::record::LogRecord;
use crate::sinks::{RecordSink, SinkError};

/// One persisted row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// `None` when the extension has no persisted identity.
    pub extension_id: Option<u64>,
    pub extension: String,
    #[serde(flatten)]
    pub record: LogRecord,
}

/// Appends records to a JSON-lines file.
#[derive(Debug, Clone)]
pub struct JsonLinesRecordStore {
    path: PathBuf,
    extension_id: Option<u64>,
    extension: String,
}

impl JsonLinesRecordStore {
    /// Open (or create) the store file.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            extension_id: None,
            extension: String::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the last `limit` rows of a store file.
    pub fn tail(path: impl AsRef<Path>, limit: usize) -> Result<Vec<StoredRecord>, SinkError> {
        let reader = BufReader::new(File::open(path)?);
        let mut rows = VecDeque::with_capacity(limit);
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if rows.len() == limit {
                rows.pop_front();
            }
            if limit > 0 {
                rows.push_back(serde_json::from_str(&line)?);
            }
        }
        Ok(rows.into())
    }
}

impl RecordSink for JsonLinesRecordStore {
    fn name(&self) -> &'static str {
        "record-store"
    }

    fn attach(&mut self, extension: &ResolvedExtension) {
        self.extension_id = extension.handle.as_ref().map(|h| h.id);
        self.extension = extension.name.clone();
    }

    fn write_batch(&mut self, records: &[LogRecord]) -> Result<(), SinkError> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = BufWriter::new(file);
        for record in records {
            let row = StoredRecord {
                extension_id: self.extension_id,
                extension: self.extension.clone(),
                record: record.clone(),
            };
            serde_json::to_writer(&mut writer, &row)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}
