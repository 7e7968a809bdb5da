//! SQLite component store
//!
//! File-based durable storage using SQLite. An in-memory constructor is
//! provided for tests.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use crate::features::component_store::domain::models::{
    module_uuid_path, Component, ComponentUuid, Qualifier,
};
use crate::features::component_store::domain::ports::ComponentStore;
use crate::shared::models::{IngestError, Result};

/// SQLite-based [`ComponentStore`] implementation
#[derive(Clone)]
pub struct SqliteComponentStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteComponentStore {
    /// Open (or create) a store at the given path
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS components (
                uuid TEXT PRIMARY KEY,
                key TEXT NOT NULL UNIQUE,
                project_uuid TEXT NOT NULL,
                module_uuid_path TEXT NOT NULL,
                path TEXT,
                qualifier TEXT NOT NULL,
                enabled INTEGER NOT NULL DEFAULT 1,
                created_at INTEGER NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_components_project_key
             ON components(project_uuid, key)",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_components_module_path
             ON components(project_uuid, module_uuid_path, path)",
            [],
        )?;

        tracing::debug!("component schema ready");
        Ok(())
    }

    /// Insert or update a row. Used by the persistence stage that runs
    /// after identity resolution, and by tests to seed fixtures.
    pub fn save_component(&self, component: &Component) -> Result<()> {
        let conn = self.conn.lock()?;
        conn.execute(
            "INSERT OR REPLACE INTO components
             (uuid, key, project_uuid, module_uuid_path, path, qualifier, enabled, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                &component.uuid,
                &component.key,
                &component.project_uuid,
                &component.module_uuid_path,
                &component.path,
                component.qualifier.as_str(),
                component.enabled,
                component.created_at.timestamp(),
            ],
        )?;
        Ok(())
    }
}

fn read_component(row: &rusqlite::Row<'_>) -> rusqlite::Result<Component> {
    let qualifier: String = row.get(5)?;
    let qualifier = Qualifier::parse(&qualifier).ok_or_else(|| {
        rusqlite::Error::InvalidColumnType(5, "qualifier".to_string(), rusqlite::types::Type::Text)
    })?;
    Ok(Component {
        uuid: row.get(0)?,
        key: row.get(1)?,
        project_uuid: row.get(2)?,
        module_uuid_path: row.get(3)?,
        path: row.get(4)?,
        qualifier,
        enabled: row.get(6)?,
        created_at: chrono::DateTime::from_timestamp(row.get(7)?, 0).unwrap_or_default(),
    })
}

#[async_trait]
impl ComponentStore for SqliteComponentStore {
    async fn find_by_project_and_key(
        &self,
        project_key: &str,
        key: &str,
    ) -> Result<Option<Component>> {
        let conn = self.conn.lock()?;
        let result = conn
            .query_row(
                "SELECT c.uuid, c.key, c.project_uuid, c.module_uuid_path, c.path,
                        c.qualifier, c.enabled, c.created_at
                 FROM components c
                 JOIN components p ON p.uuid = c.project_uuid
                 WHERE p.key = ?1 AND p.uuid = p.project_uuid AND c.key = ?2",
                params![project_key, key],
                read_component,
            )
            .optional()?;
        Ok(result)
    }

    async fn find_by_project_and_module_path(
        &self,
        project_uuid: &str,
        module_uuids: &[ComponentUuid],
        relative_path: &str,
    ) -> Result<Option<Component>> {
        let expected = module_uuid_path(project_uuid, module_uuids);
        let conn = self.conn.lock()?;
        let mut stmt = conn.prepare(
            "SELECT uuid, key, project_uuid, module_uuid_path, path,
                    qualifier, enabled, created_at
             FROM components
             WHERE project_uuid = ?1 AND module_uuid_path = ?2 AND path = ?3
             LIMIT 2",
        )?;
        let mut matches = stmt
            .query_map(params![project_uuid, &expected, relative_path], |row| {
                read_component(row)
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        if matches.len() > 1 {
            return Err(IngestError::ambiguous_match(&expected, relative_path));
        }
        Ok(matches.pop())
    }
}
