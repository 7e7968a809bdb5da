//! Component uuid resolution for one ingestion run

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use uuid::Uuid;

use crate::features::component_store::domain::models::{
    ancestor_uuids, Component, ComponentKey, ComponentUuid, Qualifier,
};
use crate::features::component_store::domain::ports::ComponentStore;
use crate::features::identity::domain::legacy_key::{derive_legacy_key, LegacyKey};
use crate::shared::models::Result;

/// Maps report keys to persistent component uuids for one ingestion run.
///
/// Resolution order per key: the in-run cache, then the store by current
/// key, then the store by derived legacy location, then a freshly minted
/// uuid. Results are cached for the lifetime of the factory, so one run
/// never hands out two different uuids for the same report key, and a
/// store mutation observed after caching cannot change an answer mid-run.
///
/// The exclusive receiver on [`resolve`](Self::resolve) leaves
/// serialization to callers that ingest from several workers; wrap the
/// factory in a mutex to share it.
pub struct ComponentUuidFactory {
    store: Arc<dyn ComponentStore>,
    root_key: ComponentKey,
    modules_relative_paths: HashMap<ComponentKey, String>,
    uuids_by_key: HashMap<ComponentKey, ComponentUuid>,
    /// Uuids of the mapped legacy module rows, loaded on first use
    legacy_module_uuids: Option<HashSet<ComponentUuid>>,
}

impl ComponentUuidFactory {
    /// `modules_relative_paths` maps legacy module keys to project-relative
    /// paths, as sent with the analysis report. The map may be empty for
    /// projects that never had modules.
    pub fn new(
        store: Arc<dyn ComponentStore>,
        root_key: impl Into<ComponentKey>,
        modules_relative_paths: HashMap<ComponentKey, String>,
    ) -> Self {
        Self {
            store,
            root_key: root_key.into(),
            modules_relative_paths,
            uuids_by_key: HashMap::new(),
            legacy_module_uuids: None,
        }
    }

    /// Resolve `report_key` to its persistent uuid, minting a fresh one for
    /// components seen for the first time.
    ///
    /// Idempotent within the run: the second call for a key answers from
    /// the cache without touching the store.
    pub async fn resolve(&mut self, report_key: &str) -> Result<ComponentUuid> {
        if let Some(uuid) = self.uuids_by_key.get(report_key) {
            return Ok(uuid.clone());
        }
        let uuid = self.lookup_or_mint(report_key).await?;
        self.uuids_by_key.insert(report_key.to_string(), uuid.clone());
        Ok(uuid)
    }

    async fn lookup_or_mint(&mut self, report_key: &str) -> Result<ComponentUuid> {
        if let Some(component) = self.find_by_current_key(report_key).await? {
            return Ok(component.uuid);
        }
        if let Some(legacy) =
            derive_legacy_key(report_key, &self.root_key, &self.modules_relative_paths)
        {
            if let Some(uuid) = self.find_by_legacy_key(&legacy).await? {
                tracing::debug!("migrated {} from legacy location {}", report_key, legacy);
                return Ok(uuid);
            }
        }
        let uuid = Uuid::new_v4().to_string();
        tracing::debug!("minted uuid for new component {}", report_key);
        Ok(uuid)
    }

    /// A stored row answers for `report_key` only when that key is its
    /// current-format key. Rows keyed under the retired module scheme (the
    /// mapped modules themselves and everything below them) are reachable
    /// through their legacy location only; their stored key strings are
    /// dead.
    async fn find_by_current_key(&mut self, report_key: &str) -> Result<Option<Component>> {
        let Some(component) = self
            .store
            .find_by_project_and_key(&self.root_key, report_key)
            .await?
        else {
            return Ok(None);
        };
        if self.is_legacy_keyed(&component).await? {
            return Ok(None);
        }
        Ok(Some(component))
    }

    async fn is_legacy_keyed(&mut self, component: &Component) -> Result<bool> {
        // the root is never migrated
        if component.qualifier == Qualifier::Project {
            return Ok(false);
        }
        if component.key != self.root_key
            && self.modules_relative_paths.contains_key(&component.key)
        {
            return Ok(true);
        }
        if self.modules_relative_paths.is_empty() {
            return Ok(false);
        }
        let legacy_modules = self.legacy_module_uuids().await?;
        Ok(ancestor_uuids(&component.module_uuid_path).any(|uuid| legacy_modules.contains(uuid)))
    }

    async fn legacy_module_uuids(&mut self) -> Result<&HashSet<ComponentUuid>> {
        if self.legacy_module_uuids.is_none() {
            let mut uuids = HashSet::new();
            for (module_key, module_path) in &self.modules_relative_paths {
                if module_path.is_empty() || module_key == &self.root_key {
                    continue;
                }
                if let Some(module) = self
                    .store
                    .find_by_project_and_key(&self.root_key, module_key)
                    .await?
                {
                    uuids.insert(module.uuid);
                }
            }
            self.legacy_module_uuids = Some(uuids);
        }
        Ok(self.legacy_module_uuids.get_or_insert_with(HashSet::new))
    }

    async fn find_by_legacy_key(&self, legacy: &LegacyKey) -> Result<Option<ComponentUuid>> {
        let Some(project) = self
            .store
            .find_by_project_and_key(&self.root_key, &self.root_key)
            .await?
        else {
            return Ok(None);
        };

        let mut module_uuids = Vec::with_capacity(legacy.module_keys.len());
        for module_key in &legacy.module_keys {
            match self
                .store
                .find_by_project_and_key(&self.root_key, module_key)
                .await?
            {
                Some(module) => module_uuids.push(module.uuid),
                // chain broken in storage: nothing left to migrate from
                None => return Ok(None),
            }
        }

        match &legacy.relative_path {
            None => Ok(module_uuids.last().cloned()),
            Some(relative_path) => Ok(self
                .store
                .find_by_project_and_module_path(&project.uuid, &module_uuids, relative_path)
                .await?
                .map(|component| component.uuid)),
        }
    }
}
