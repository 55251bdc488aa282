//! Extension identity and configuration lookup.
//!
//! # Data Flow
//! ```text
//! (name, signature)
//!     → resolver.rs (generic / found / created / failed)
//!     → store.rs (ConfigStore: find_by_signature, create, update)
//!     → ResolvedExtension { handle, name, config }
//! ```
//!
//! # Design Decisions
//! - Resolution never fails; store errors are reported and defaults used
//! - One read, at most one write, per resolution

pub mod file_store;
pub mod resolver;
pub mod store;

pub use file_store::JsonConfigStore;
pub use resolver::{
    effective_signature, ExtensionHandle, ExtensionResolver, ResolutionOutcome, ResolvedExtension,
    DEFAULT_SIGNATURE, SIGNATURE_LEN,
};
pub use store::{
    ConfigStore, ExtensionRecord, MemoryConfigStore, StoreError, UnavailableConfigStore,
};
