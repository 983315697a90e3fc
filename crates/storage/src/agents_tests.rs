// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use deck_core::AgentDefinition;
use serde_json::json;

fn definition(model: &str) -> AgentDefinition {
    let mut def = AgentDefinition::new();
    def.insert("model", model);
    def.insert("system_prompt", "Review the diff.");
    def
}

fn draft(name: &str) -> AgentDraft {
    AgentDraft::new(name, definition("sonnet"))
}

fn stores(dir: &Path) -> Vec<Box<dyn AgentStore>> {
    vec![
        Box::new(MemoryAgentStore::new()),
        Box::new(FileAgentStore::open(dir.join("agents.json")).unwrap()),
    ]
}

#[test]
fn create_list_delete_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    for store in stores(dir.path()) {
        assert!(store.list().is_empty());

        let created = store.create(draft("Reviewer")).unwrap();
        let id = created.id.clone().unwrap();
        assert!(id.as_str().starts_with("agt-"));

        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Reviewer");
        assert_eq!(listed[0].definition, definition("sonnet"));
        assert_eq!(listed[0].id.as_ref(), Some(&id));

        store.delete(&id).unwrap();
        assert!(store.list().is_empty());
    }
}

#[test]
fn list_keeps_insertion_order() {
    let dir = tempfile::tempdir().unwrap();
    for store in stores(dir.path()) {
        for name in ["b", "a", "c"] {
            store.create(draft(name)).unwrap();
        }
        let names: Vec<_> = store.list().into_iter().map(|a| a.name).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }
}

#[test]
fn update_missing_is_not_found_and_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    for store in stores(dir.path()) {
        let missing = AgentId::from_string("agt-missing");
        let err = store.update(&missing, draft("Ghost")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(ref id) if *id == missing));
        assert!(store.list().is_empty());
    }
}

#[test]
fn update_replaces_contents_and_keeps_id() {
    let dir = tempfile::tempdir().unwrap();
    for store in stores(dir.path()) {
        let id = store.create(draft("Reviewer")).unwrap().id.unwrap();
        let updated = store.update(&id, AgentDraft::new("Critic", definition("opus"))).unwrap();

        assert_eq!(updated.id.as_ref(), Some(&id));
        let fetched = store.get(&id).unwrap();
        assert_eq!(fetched.name, "Critic");
        assert_eq!(fetched.definition.model(), Some("opus"));
    }
}

#[test]
fn delete_and_get_missing_are_not_found() {
    let dir = tempfile::tempdir().unwrap();
    for store in stores(dir.path()) {
        let missing = AgentId::from_string("agt-nope");
        assert!(matches!(store.delete(&missing), Err(StoreError::NotFound(_))));
        assert!(matches!(store.get(&missing), Err(StoreError::NotFound(_))));
    }
}

#[yare::parameterized(
    empty  = { "" },
    spaces = { "   " },
    tabs   = { "\t\n" },
)]
fn blank_names_are_rejected(name: &str) {
    let store = MemoryAgentStore::new();
    let err = store.create(draft(name)).unwrap_err();
    assert!(matches!(err, StoreError::InvalidAgent(AgentError::EmptyName)));
    assert!(store.list().is_empty());
}

#[test]
fn created_ids_are_distinct() {
    let store = MemoryAgentStore::new();
    let a = store.create(draft("same")).unwrap().id.unwrap();
    let b = store.create(draft("same")).unwrap().id.unwrap();
    assert_ne!(a, b);
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agents.json");

    let id = {
        let store = FileAgentStore::open(&path).unwrap();
        store.create(draft("Reviewer")).unwrap();
        store.create(draft("Planner")).unwrap().id.unwrap()
    };

    let reopened = FileAgentStore::open(&path).unwrap();
    let names: Vec<_> = reopened.list().into_iter().map(|a| a.name).collect();
    assert_eq!(names, ["Reviewer", "Planner"]);
    assert_eq!(reopened.get(&id).unwrap().definition, definition("sonnet"));
}

#[test]
fn file_format_carries_version_marker() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agents.json");
    let store = FileAgentStore::open(&path).unwrap();
    store.create(draft("Reviewer")).unwrap();

    let raw: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(raw["v"], json!(AGENTS_FILE_VERSION));
    assert_eq!(raw["agents"][0]["name"], json!("Reviewer"));
    assert_eq!(raw["agents"][0]["definition"]["model"], json!("sonnet"));
}

#[test]
fn corrupt_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agents.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = FileAgentStore::open(&path).unwrap_err();
    assert!(matches!(err, StoreError::Corrupt { .. }));
}

#[test]
fn failed_write_rolls_back_memory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("agents.json");
    let store = FileAgentStore::open(&path).unwrap();
    store.create(draft("Reviewer")).unwrap();

    // Replace the file with a directory so the rename fails.
    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir_all(path.join("blocker")).unwrap();

    let err = store.create(draft("Planner")).unwrap_err();
    assert!(matches!(err, StoreError::PersistenceFailed { .. }));
    let names: Vec<_> = store.list().into_iter().map(|a| a.name).collect();
    assert_eq!(names, ["Reviewer"]);
}
