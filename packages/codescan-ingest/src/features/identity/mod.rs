//! Component identity resolution
//!
//! Maps report keys to the persistent uuids used by storage rows,
//! cross-analysis history and differential views, migrating entities that
//! were persisted under the retired module-hierarchy key format.

pub mod application;
pub mod domain;

pub use application::uuid_factory::ComponentUuidFactory;
pub use domain::legacy_key::{derive_legacy_key, LegacyKey};
pub use domain::report_key::{component_key, key_path_part, KEY_DELIMITER, PATH_SEPARATOR};
