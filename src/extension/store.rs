//! Config store collaborator.
//!
//! The logger only needs three things from persistence: find an extension by
//! signature, create one, and update one. [`MemoryConfigStore`] keeps them in
//! a concurrent map.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::BlobError;

/// A persisted extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRecord {
    /// Store-assigned id. Zero until created.
    pub id: u64,
    pub name: String,
    pub signature: String,
    pub description: String,
    pub authors: String,
    /// Serialized [`ExtensionConfig`](crate::config::ExtensionConfig).
    pub config_blob: Option<String>,
}

/// Errors from a config store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("extension with signature {0} already exists")]
    Duplicate(String),

    #[error("no extension with signature {0}")]
    NotFound(String),

    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("store data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("stored extension config is invalid: {0}")]
    InvalidConfig(#[from] BlobError),
}

/// Persistence for extension records, keyed by signature.
pub trait ConfigStore: Send + Sync {
    fn find_by_signature(&self, signature: &str) -> Result<Option<ExtensionRecord>, StoreError>;

    /// Persist a new record and return it with its assigned id.
    fn create(&self, record: ExtensionRecord) -> Result<ExtensionRecord, StoreError>;

    /// Replace the stored record with the same signature.
    fn update(&self, record: &ExtensionRecord) -> Result<(), StoreError>;
}

impl<S: ConfigStore + ?Sized> ConfigStore for Arc<S> {
    fn find_by_signature(&self, signature: &str) -> Result<Option<ExtensionRecord>, StoreError> {
        (**self).find_by_signature(signature)
    }

    fn create(&self, record: ExtensionRecord) -> Result<ExtensionRecord, StoreError> {
        (**self).create(record)
    }

    fn update(&self, record: &ExtensionRecord) -> Result<(), StoreError> {
        (**self).update(record)
    }
}

/// In-memory store. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryConfigStore {
    records: Arc<DashMap<String, ExtensionRecord>>,
    next_id: Arc<AtomicU64>,
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from existing records, keeping their ids.
    pub fn with_records(records: impl IntoIterator<Item = ExtensionRecord>) -> Self {
        let store = Self::new();
        let mut max_id = 0;
        for record in records {
            max_id = max_id.max(record.id);
            store.records.insert(record.signature.clone(), record);
        }
        store.next_id.store(max_id, Ordering::Relaxed);
        store
    }

    /// Number of `find_by_signature` calls served.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }

    /// Number of `create`/`update` calls served.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, ordered by id.
    pub fn records(&self) -> Vec<ExtensionRecord> {
        let mut all: Vec<_> = self.records.iter().map(|r| r.value().clone()).collect();
        all.sort_by_key(|r| r.id);
        all
    }
}

impl ConfigStore for MemoryConfigStore {
    fn find_by_signature(&self, signature: &str) -> Result<Option<ExtensionRecord>, StoreError> {
        self.reads.fetch_add(1, Ordering::Relaxed);
        Ok(self.records.get(signature).map(|r| r.value().clone()))
    }

    fn create(&self, mut record: ExtensionRecord) -> Result<ExtensionRecord, StoreError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        // The entry guard holds the shard lock across the check and the insert.
        match self.records.entry(record.signature.clone()) {
            Entry::Occupied(_) => Err(StoreError::Duplicate(record.signature)),
            Entry::Vacant(slot) => {
                record.id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    fn update(&self, record: &ExtensionRecord) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::Relaxed);
        match self.records.get_mut(&record.signature) {
            Some(mut existing) => {
                let id = existing.id;
                *existing = record.clone();
                existing.id = id;
                Ok(())
            }
            None => Err(StoreError::NotFound(record.signature.clone())),
        }
    }
}

/// Store that could not be opened. Every call fails with the recorded
/// reason, so resolution reports it and runs on the default config.
#[derive(Debug, Clone)]
pub struct UnavailableConfigStore {
    reason: String,
}

impl UnavailableConfigStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    fn error(&self) -> StoreError {
        StoreError::Unavailable(self.reason.clone())
    }
}

impl ConfigStore for UnavailableConfigStore {
    fn find_by_signature(&self, _signature: &str) -> Result<Option<ExtensionRecord>, StoreError> {
        Err(self.error())
    }

    fn create(&self, _record: ExtensionRecord) -> Result<ExtensionRecord, StoreError> {
        Err(self.error())
    }

    fn update(&self, _record: &ExtensionRecord) -> Result<(), StoreError> {
        Err(self.error())
    }
}
