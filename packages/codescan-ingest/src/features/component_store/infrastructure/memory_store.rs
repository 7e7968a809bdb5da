//! In-memory component store (for testing)
//!
//! HashMap-based implementation for unit tests. NOT for production use.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::features::component_store::domain::models::{
    module_uuid_path, Component, ComponentUuid,
};
use crate::features::component_store::domain::ports::ComponentStore;
use crate::shared::models::{IngestError, Result};

#[derive(Clone, Default)]
pub struct InMemoryComponentStore {
    components: Arc<RwLock<HashMap<ComponentUuid, Component>>>,
}

impl InMemoryComponentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_component(&self, component: &Component) -> Result<()> {
        self.components
            .write()?
            .insert(component.uuid.clone(), component.clone());
        Ok(())
    }

    pub fn remove_component(&self, uuid: &str) -> Result<()> {
        self.components.write()?.remove(uuid);
        Ok(())
    }
}

#[async_trait]
impl ComponentStore for InMemoryComponentStore {
    async fn find_by_project_and_key(
        &self,
        project_key: &str,
        key: &str,
    ) -> Result<Option<Component>> {
        let components = self.components.read()?;
        let Some(project) = components
            .values()
            .find(|c| c.key == project_key && c.uuid == c.project_uuid)
        else {
            return Ok(None);
        };
        Ok(components
            .values()
            .find(|c| c.project_uuid == project.uuid && c.key == key)
            .cloned())
    }

    async fn find_by_project_and_module_path(
        &self,
        project_uuid: &str,
        module_uuids: &[ComponentUuid],
        relative_path: &str,
    ) -> Result<Option<Component>> {
        let expected = module_uuid_path(project_uuid, module_uuids);
        let components = self.components.read()?;
        let mut matches = components.values().filter(|c| {
            c.project_uuid == project_uuid
                && c.module_uuid_path == expected
                && c.path.as_deref() == Some(relative_path)
        });

        let first = matches.next().cloned();
        if matches.next().is_some() {
            return Err(IngestError::ambiguous_match(&expected, relative_path));
        }
        Ok(first)
    }
}
