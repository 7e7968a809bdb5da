//! codescan-ingest: component identity resolution for report ingestion
//!
//! When a source-tree analysis report is ingested into the persistent
//! project model, every analyzed entity (project, module, directory, file)
//! arrives tagged with a report key and must be mapped to the stable uuid
//! used everywhere else: storage rows, cross-analysis history,
//! differential views. [`ComponentUuidFactory`] performs that mapping for
//! one ingestion run.
//!
//! Report keys are not stable across report format revisions. Older
//! reports kept an explicit module level in keys; current reports flatten
//! modules away and key files by project-relative path. The factory
//! answers from its run-scoped cache first, then from the store by current
//! key, then by the entity's derived location in the retired module
//! hierarchy, and mints a fresh uuid only for components never seen
//! before.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use codescan_ingest::{ComponentUuidFactory, SqliteComponentStore};
//!
//! let store = Arc::new(SqliteComponentStore::new("components.db")?);
//! let modules = HashMap::from([
//!     ("acme:server".to_string(), "server".to_string()),
//! ]);
//! let mut factory = ComponentUuidFactory::new(store, "acme", modules);
//!
//! // finds the row persisted under the legacy key "acme:server"
//! let uuid = factory.resolve("acme:server/src/main.c").await?;
//! ```

pub mod features;
pub mod shared;

pub use shared::models::{ErrorKind, IngestError, Result};

pub use features::component_store::{
    ancestor_uuids, module_uuid_path, Component, ComponentKey, ComponentStore, ComponentUuid,
    InMemoryComponentStore, Qualifier,
};
#[cfg(feature = "sqlite")]
pub use features::component_store::SqliteComponentStore;

pub use features::identity::{component_key, derive_legacy_key, ComponentUuidFactory, LegacyKey};
