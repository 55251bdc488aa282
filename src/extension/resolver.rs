//! Extension resolution.
//!
//! # Flow
//! ```text
//! signature not 40 chars, absent, or DEFAULT_SIGNATURE
//!     → generic logger: default config, no handle, no store access
//! signature found in store
//!     → stored id/name, stored blob merged with defaults
//! signature not found
//!     → create record with default config, use the new handle
//! store error
//!     → reported, default config, no handle
//! ```
//!
//! At most one read and one write hit the store per resolution.

use crate::config::schema::NOT_SPECIFIED;
use crate::config::{BlobError, ExtensionConfig};
use crate::error::LoggerError;
use crate::extension::store::{ConfigStore, ExtensionRecord, StoreError};
use crate::observability::{metrics, ErrorReporter};

/// Signature of the generic, unconfigured logger.
pub const DEFAULT_SIGNATURE: &str = "92acaed5cb6dc95783ea1d0b194347c542017bfc";

/// Length of a real extension signature.
pub const SIGNATURE_LEN: usize = 40;

/// Persisted identity of a resolved extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionHandle {
    pub id: u64,
    pub name: String,
    pub signature: String,
}

/// How a resolution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Generic logger, store not consulted.
    Generic,
    /// Existing record adopted.
    Found,
    /// New record persisted.
    Created,
    /// Store failed; running on defaults.
    Failed,
}

impl ResolutionOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolutionOutcome::Generic => "generic",
            ResolutionOutcome::Found => "found",
            ResolutionOutcome::Created => "created",
            ResolutionOutcome::Failed => "failed",
        }
    }
}

/// Result of resolving an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExtension {
    /// `None` for the generic logger or when the store failed.
    pub handle: Option<ExtensionHandle>,
    /// Name records are grouped under.
    pub name: String,
    /// Effective signature (the default one in generic mode).
    pub signature: String,
    pub config: ExtensionConfig,
    pub outcome: ResolutionOutcome,
}

/// Normalize a caller signature. `None` means the generic logger.
pub fn effective_signature(signature: Option<&str>) -> Option<&str> {
    signature.filter(|s| s.chars().count() == SIGNATURE_LEN && *s != DEFAULT_SIGNATURE)
}

/// Resolves extensions against a [`ConfigStore`].
pub struct ExtensionResolver<'a> {
    store: &'a dyn ConfigStore,
    reporter: &'a ErrorReporter,
}

impl<'a> ExtensionResolver<'a> {
    pub fn new(store: &'a dyn ConfigStore, reporter: &'a ErrorReporter) -> Self {
        Self { store, reporter }
    }

    /// Resolve `name`/`signature` to an extension and its config. Never fails.
    pub fn resolve(&self, name: &str, signature: Option<&str>) -> ResolvedExtension {
        let resolved = match effective_signature(signature) {
            None => generic(name),
            Some(signature) => match self.lookup_or_create(name, signature) {
                Ok(resolved) => resolved,
                Err(source) => {
                    self.reporter.report(&LoggerError::Resolution {
                        signature: signature.to_string(),
                        source,
                    });
                    ResolvedExtension {
                        handle: None,
                        name: name.to_string(),
                        signature: signature.to_string(),
                        config: ExtensionConfig::default(),
                        outcome: ResolutionOutcome::Failed,
                    }
                }
            },
        };

        metrics::record_resolution(resolved.outcome);
        tracing::debug!(
            extension = %resolved.name,
            outcome = resolved.outcome.as_str(),
            config = ?resolved.config,
            "Extension resolved"
        );
        resolved
    }

    fn lookup_or_create(&self, name: &str, signature: &str) -> Result<ResolvedExtension, StoreError> {
        match self.store.find_by_signature(signature)? {
            Some(record) => Ok(self.adopt(record)),
            None => self.create(name, signature),
        }
    }

    fn adopt(&self, record: ExtensionRecord) -> ResolvedExtension {
        let config = match record.config_blob.as_deref() {
            None => ExtensionConfig::default(),
            Some(blob) => match ExtensionConfig::from_blob(blob) {
                Ok(config) => config,
                Err(BlobError::Empty) => ExtensionConfig::default(),
                Err(e) => {
                    self.reporter.report(&LoggerError::Resolution {
                        signature: record.signature.clone(),
                        source: StoreError::InvalidConfig(e),
                    });
                    ExtensionConfig::default()
                }
            },
        };

        ResolvedExtension {
            name: record.name.clone(),
            signature: record.signature.clone(),
            handle: Some(ExtensionHandle {
                id: record.id,
                name: record.name,
                signature: record.signature,
            }),
            config,
            outcome: ResolutionOutcome::Found,
        }
    }

    fn create(&self, name: &str, signature: &str) -> Result<ResolvedExtension, StoreError> {
        let config = ExtensionConfig::default();
        let created = self.store.create(ExtensionRecord {
            id: 0,
            name: name.to_string(),
            signature: signature.to_string(),
            description: NOT_SPECIFIED.to_string(),
            authors: NOT_SPECIFIED.to_string(),
            config_blob: Some(config.to_blob()),
        })?;

        Ok(ResolvedExtension {
            name: created.name.clone(),
            signature: created.signature.clone(),
            handle: Some(ExtensionHandle {
                id: created.id,
                name: created.name,
                signature: created.signature,
            }),
            config,
            outcome: ResolutionOutcome::Created,
        })
    }
}

fn generic(name: &str) -> ResolvedExtension {
    ResolvedExtension {
        handle: None,
        name: name.to_string(),
        signature: DEFAULT_SIGNATURE.to_string(),
        config: ExtensionConfig::default(),
        outcome: ResolutionOutcome::Generic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::store::MemoryConfigStore;
    use crate::record::Severity;
    use std::sync::{Arc, Mutex};

    const SIG: &str = "0123456789abcdef0123456789abcdef01234567";

    struct FailingStore;

    impl ConfigStore for FailingStore {
        fn find_by_signature(&self, _: &str) -> Result<Option<ExtensionRecord>, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        fn create(&self, _: ExtensionRecord) -> Result<ExtensionRecord, StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }

        fn update(&self, _: &ExtensionRecord) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("connection refused".into()))
        }
    }

    fn collecting() -> (ErrorReporter, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let reporter = ErrorReporter::new(move |e| sink.lock().unwrap().push(e.to_string()));
        (reporter, seen)
    }

    fn stored(blob: Option<&str>) -> MemoryConfigStore {
        MemoryConfigStore::with_records([ExtensionRecord {
            id: 12,
            name: "Order Sync".into(),
            signature: SIG.into(),
            description: "Imports orders".into(),
            authors: "ops".into(),
            config_blob: blob.map(str::to_string),
        }])
    }

    #[test]
    fn test_wrong_length_signature_skips_store() {
        let store = MemoryConfigStore::new();
        let (reporter, _) = collecting();
        let resolver = ExtensionResolver::new(&store, &reporter);

        let long = "x".repeat(41);
        for sig in [None, Some("short"), Some(long.as_str()), Some(DEFAULT_SIGNATURE)] {
            let resolved = resolver.resolve("Test", sig);
            assert_eq!(resolved.outcome, ResolutionOutcome::Generic);
            assert!(resolved.handle.is_none());
            assert_eq!(resolved.config, ExtensionConfig::default());
            assert_eq!(resolved.signature, DEFAULT_SIGNATURE);
        }
        assert_eq!(store.read_count(), 0);
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_found_record_adopts_name_and_merges_config() {
        let store = stored(Some(r#"{"logThreshold":"2"}"#));
        let (reporter, seen) = collecting();
        let resolved = ExtensionResolver::new(&store, &reporter).resolve("caller name", Some(SIG));

        assert_eq!(resolved.outcome, ResolutionOutcome::Found);
        assert_eq!(resolved.name, "Order Sync");
        assert_eq!(resolved.handle.as_ref().map(|h| h.id), Some(12));
        assert_eq!(
            resolved.config,
            ExtensionConfig {
                log_to_file: false,
                log_to_database: true,
                log_threshold: Severity::Error,
                log_clicks: false,
            }
        );
        assert_eq!(store.read_count(), 1);
        assert_eq!(store.write_count(), 0);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_blob_falls_back_to_full_default() {
        let store = stored(Some("[\"logClicks\"]"));
        let (reporter, seen) = collecting();
        let resolved = ExtensionResolver::new(&store, &reporter).resolve("x", Some(SIG));

        assert_eq!(resolved.outcome, ResolutionOutcome::Found);
        assert_eq!(resolved.config, ExtensionConfig::default());
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_absent_blob_is_default_without_report() {
        let store = stored(None);
        let (reporter, seen) = collecting();
        let resolved = ExtensionResolver::new(&store, &reporter).resolve("x", Some(SIG));
        assert_eq!(resolved.config, ExtensionConfig::default());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_signature_creates_record() {
        let store = MemoryConfigStore::new();
        let (reporter, _) = collecting();
        let resolved = ExtensionResolver::new(&store, &reporter).resolve("Billing", Some(SIG));

        assert_eq!(resolved.outcome, ResolutionOutcome::Created);
        assert_eq!(resolved.handle.as_ref().map(|h| h.id), Some(1));
        assert_eq!(store.read_count(), 1);
        assert_eq!(store.write_count(), 1);

        let created = store.find_by_signature(SIG).unwrap().unwrap();
        assert_eq!(created.name, "Billing");
        assert_eq!(created.description, "Not Specified");
        assert_eq!(created.authors, "Not Specified");
        assert_eq!(
            ExtensionConfig::merge_blob(created.config_blob.as_deref()),
            ExtensionConfig::default()
        );
    }

    #[test]
    fn test_store_failure_is_reported_not_raised() {
        let (reporter, seen) = collecting();
        let resolved = ExtensionResolver::new(&FailingStore, &reporter).resolve("Billing", Some(SIG));

        assert_eq!(resolved.outcome, ResolutionOutcome::Failed);
        assert!(resolved.handle.is_none());
        assert_eq!(resolved.config, ExtensionConfig::default());
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("connection refused"));
    }
}
