//! Adapter behavior and resolution scenarios against the SQLite store
#![cfg(feature = "sqlite")]

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use codescan_ingest::{ComponentStore, ComponentUuidFactory, ErrorKind, SqliteComponentStore};
use common::{disabled, new_file, new_module, new_project};

fn module_map(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(key, path)| (key.to_string(), path.to_string()))
        .collect()
}

#[tokio::test]
async fn finds_components_by_key_and_by_module_path() {
    let store = SqliteComponentStore::in_memory().unwrap();
    let project = new_project("acme");
    let module1 = new_module(&project, "acme:server", "server");
    let file1 = disabled(new_file(&module1, "acme:server:main.c", "src/main.c"));
    for component in [&project, &module1, &file1] {
        store.save_component(component).unwrap();
    }

    let by_key = store
        .find_by_project_and_key("acme", "acme:server:main.c")
        .await
        .unwrap()
        .unwrap();
    // disabled rows stay addressable
    assert_eq!(by_key.uuid, file1.uuid);
    assert!(!by_key.enabled);

    assert!(store
        .find_by_project_and_key("widgets", "acme:server:main.c")
        .await
        .unwrap()
        .is_none());

    let by_path = store
        .find_by_project_and_module_path(
            &project.uuid,
            &[module1.uuid.clone()],
            "src/main.c",
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_path.uuid, file1.uuid);

    // exact matching only
    assert!(store
        .find_by_project_and_module_path(&project.uuid, &[], "src/main.c")
        .await
        .unwrap()
        .is_none());
    assert!(store
        .find_by_project_and_module_path(&project.uuid, &[module1.uuid.clone()], "src/main")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn migrates_nested_hierarchy() {
    let store = SqliteComponentStore::in_memory().unwrap();
    let project = new_project("project");
    let module1 = new_module(&project, "project:module1", "module1_path");
    let module2 = new_module(&module1, "project:module1:module2", "module1_path/module2_path");
    let file2 = new_file(&module2, "project:module1:module2:file2", "file2_path");
    for component in [&project, &module1, &module2, &file2] {
        store.save_component(component).unwrap();
    }

    let map = module_map(&[
        ("project:module1", "module1_path"),
        ("project:module1:module2", "module1_path/module2_path"),
    ]);
    let mut factory = ComponentUuidFactory::new(Arc::new(store), "project", map);

    assert_eq!(factory.resolve("project").await.unwrap(), project.uuid);
    assert_eq!(
        factory.resolve("project:module1_path").await.unwrap(),
        module1.uuid
    );
    assert_eq!(
        factory
            .resolve("project:module1_path/module2_path")
            .await
            .unwrap(),
        module2.uuid
    );
    assert_eq!(
        factory
            .resolve("project:module1_path/module2_path/file2_path")
            .await
            .unwrap(),
        file2.uuid
    );

    let persisted = [&project.uuid, &module1.uuid, &module2.uuid, &file2.uuid];
    let resolved = factory
        .resolve("project:module1:module2:file2")
        .await
        .unwrap();
    assert!(!persisted.contains(&&resolved));
}

#[tokio::test]
async fn duplicate_rows_fail_the_lookup() {
    let store = SqliteComponentStore::in_memory().unwrap();
    let project = new_project("project");
    let module1 = new_module(&project, "project:module1", "module1_path");
    let file_a = new_file(&module1, "project:module1:a", "file1_path");
    let file_b = new_file(&module1, "project:module1:b", "file1_path");
    for component in [&project, &module1, &file_a, &file_b] {
        store.save_component(component).unwrap();
    }

    let err = store
        .find_by_project_and_module_path(
            &project.uuid,
            &[module1.uuid.clone()],
            "file1_path",
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AmbiguousMatch);
}

#[tokio::test]
async fn rows_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("components.db");

    let project = new_project("acme");
    {
        let store = SqliteComponentStore::new(&db_path).unwrap();
        store.save_component(&project).unwrap();
    }

    let store = SqliteComponentStore::new(&db_path).unwrap();
    let mut factory = ComponentUuidFactory::new(Arc::new(store), "acme", HashMap::new());
    assert_eq!(factory.resolve("acme").await.unwrap(), project.uuid);
}
