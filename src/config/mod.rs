//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → Settings (validated, immutable)
//!     → LoggerBuilder
//!
//! stored extension blob (JSON)
//!     → extension.rs (merge with defaults)
//!     → ExtensionConfig (cached by one Logger for its lifetime)
//! ```
//!
//! # Design Decisions
//! - Settings are immutable once loaded; there is no hot reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod extension;
pub mod loader;
pub mod schema;
pub mod validation;

pub use extension::{BlobError, ExtensionConfig};
pub use loader::{load_settings, parse_settings, ConfigError};
pub use schema::{LoggerSettings, Settings, StorageSettings, ThresholdSetting};
