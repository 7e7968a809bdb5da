//! Component row builders for store fixtures
#![allow(dead_code)]

use chrono::Utc;
use uuid::Uuid;

use codescan_ingest::{Component, Qualifier};

pub fn new_project(key: &str) -> Component {
    let uuid = Uuid::new_v4().to_string();
    Component {
        uuid: uuid.clone(),
        key: key.to_string(),
        project_uuid: uuid,
        module_uuid_path: ".".to_string(),
        path: None,
        qualifier: Qualifier::Project,
        enabled: true,
        created_at: Utc::now(),
    }
}

// `parent` must be the project or a module; directories do not extend the
// module uuid chain.
fn child(parent: &Component, key: &str, path: &str, qualifier: Qualifier) -> Component {
    Component {
        uuid: Uuid::new_v4().to_string(),
        key: key.to_string(),
        project_uuid: parent.project_uuid.clone(),
        module_uuid_path: format!("{}{}.", parent.module_uuid_path, parent.uuid),
        path: Some(path.to_string()),
        qualifier,
        enabled: true,
        created_at: Utc::now(),
    }
}

pub fn new_module(parent: &Component, key: &str, path: &str) -> Component {
    child(parent, key, path, Qualifier::Module)
}

pub fn new_directory(parent: &Component, key: &str, path: &str) -> Component {
    child(parent, key, path, Qualifier::Directory)
}

pub fn new_file(parent: &Component, key: &str, path: &str) -> Component {
    child(parent, key, path, Qualifier::File)
}

pub fn disabled(mut component: Component) -> Component {
    component.enabled = false;
    component
}
