//! Durable component store
//!
//! The persisted project tree the identity resolver reads. Port/adapter
//! split:
//! - `domain/`: the `Component` row model and the `ComponentStore` port
//! - `infrastructure/`: SQLite adapter (durable) and in-memory adapter
//!   (tests)

pub mod domain;
pub mod infrastructure;

pub use domain::models::{
    ancestor_uuids, module_uuid_path, Component, ComponentKey, ComponentUuid, Qualifier,
};
pub use domain::ports::ComponentStore;

pub use infrastructure::InMemoryComponentStore;
#[cfg(feature = "sqlite")]
pub use infrastructure::SqliteComponentStore;
