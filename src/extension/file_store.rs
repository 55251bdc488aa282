//! File-backed config store.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::extension::store::{
    ConfigStore, ExtensionRecord, MemoryConfigStore, StoreError, UnavailableConfigStore,
};

/// Extension records persisted as a JSON array.
///
/// The whole file is loaded at open and rewritten after every write. A
/// rewrite goes to a sibling temporary file that is then renamed over the
/// store, so readers never see a partial array.
pub struct JsonConfigStore {
    path: PathBuf,
    inner: MemoryConfigStore,
}

impl JsonConfigStore {
    /// Open the store, loading the file if it exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let inner = if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            let records: Vec<ExtensionRecord> = serde_json::from_reader(reader)?;
            tracing::debug!(path = %path.display(), count = records.len(), "Loaded extension records");
            MemoryConfigStore::with_records(records)
        } else {
            MemoryConfigStore::new()
        };
        Ok(Self { path, inner })
    }

    /// Open the store, or stand in an [`UnavailableConfigStore`] carrying
    /// the open error when the file can't be read.
    pub fn open_or_unavailable(path: impl AsRef<Path>) -> Arc<dyn ConfigStore> {
        let path = path.as_ref();
        match Self::open(path) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Extension store unavailable");
                Arc::new(UnavailableConfigStore::new(format!("{}: {}", path.display(), e)))
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records, ordered by id.
    pub fn records(&self) -> Vec<ExtensionRecord> {
        self.inner.records()
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let temp = self.temp_path();
        let written = (|| -> Result<(), StoreError> {
            let mut writer = BufWriter::new(File::create(&temp)?);
            serde_json::to_writer_pretty(&mut writer, &self.inner.records())?;
            let file = writer.into_inner().map_err(|e| e.into_error())?;
            file.sync_all()?;
            Ok(())
        })();
        if let Err(e) = written {
            let _ = fs::remove_file(&temp);
            return Err(e);
        }

        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

impl ConfigStore for JsonConfigStore {
    fn find_by_signature(&self, signature: &str) -> Result<Option<ExtensionRecord>, StoreError> {
        self.inner.find_by_signature(signature)
    }

    fn create(&self, record: ExtensionRecord) -> Result<ExtensionRecord, StoreError> {
        let created = self.inner.create(record)?;
        self.save()?;
        tracing::info!(id = created.id, name = %created.name, "Extension record created");
        Ok(created)
    }

    fn update(&self, record: &ExtensionRecord) -> Result<(), StoreError> {
        self.inner.update(record)?;
        self.save()
    }
}
