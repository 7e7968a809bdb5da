//! Component store port
//!
//! Port/adapter pattern for backend flexibility:
//! - Durable: SQLite (zero-config)
//! - Testing: InMemory (fast unit tests)

use async_trait::async_trait;

use super::models::{Component, ComponentUuid};
use crate::shared::models::Result;

/// Read-only lookups against the durable component store.
///
/// The identity resolver only ever reads. Writing rows is the job of the
/// persistence stage that runs after resolution, so no save operations are
/// part of this contract.
///
/// Implementations must not filter on the `enabled` flag: disabled
/// components stay addressable so that re-enabled entities keep their
/// identity across analyses.
#[async_trait]
pub trait ComponentStore: Send + Sync {
    /// Find a component by its key string, scoped to the project identified
    /// by `project_key`.
    async fn find_by_project_and_key(
        &self,
        project_key: &str,
        key: &str,
    ) -> Result<Option<Component>>;

    /// Find a component structurally: by the uuid chain of the modules that
    /// contain it (outermost first) and its path relative to the innermost
    /// one.
    ///
    /// The chain must match the stored `module_uuid_path` segment for
    /// segment and the relative path must match exactly, so that
    /// `module1_path` never answers for `module1_path_extra`. When more
    /// than one row satisfies the query, the implementation must fail with
    /// [`ErrorKind::AmbiguousMatch`](crate::shared::models::ErrorKind)
    /// instead of picking one.
    async fn find_by_project_and_module_path(
        &self,
        project_uuid: &str,
        module_uuids: &[ComponentUuid],
        relative_path: &str,
    ) -> Result<Option<Component>>;
}
