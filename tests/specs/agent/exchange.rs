// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exporting and importing agent documents.

use crate::prelude::*;

#[test]
fn export_then_import_creates_copy_with_new_id() {
    let ws = Workspace::empty();
    let original = ws
        .deck()
        .args(&[
            "agent",
            "create",
            "Code Reviewer",
            "--model",
            "opus",
            "--set",
            r#"hooks={"PreToolUse":[]}"#,
            "-o",
            "json",
        ])
        .passes()
        .json();

    ws.deck()
        .args(&["agent", "export", "Code Reviewer"])
        .passes()
        .stdout_has("code-reviewer.agent.json");
    let exported: Value = serde_json::from_str(&ws.read("code-reviewer.agent.json")).unwrap();
    assert_eq!(exported["version"], json!(1));
    assert!(exported.get("id").is_none());

    let imported = ws
        .deck()
        .args(&["agent", "import", "code-reviewer.agent.json", "-o", "json"])
        .passes()
        .json();
    assert_eq!(imported["definition"], original["definition"]);
    assert_ne!(imported["id"], original["id"]);

    let listed = ws.deck().args(&["agent", "list", "-o", "json"]).passes().json();
    assert_eq!(listed.as_array().unwrap().len(), 2);
}

#[test]
fn export_to_stdout() {
    let ws = Workspace::empty();
    ws.deck().args(&["agent", "create", "Bot"]).passes();
    ws.deck()
        .args(&["agent", "export", "Bot", "--out", "-"])
        .passes()
        .stdout_has("\"version\": 1")
        .stdout_has("\"name\": \"Bot\"")
        .stdout_lacks("agt-");
}

#[test]
fn unsupported_version_is_rejected() {
    let ws = Workspace::empty();
    ws.file("future.agent.json", r#"{"version": 9, "name": "X", "definition": {}}"#);
    ws.deck()
        .args(&["agent", "import", "future.agent.json"])
        .fails_with(3)
        .stderr_has("unsupported version");
    ws.deck().args(&["agent", "list"]).passes().stdout_has("No agents");
}

#[test]
fn legacy_document_imports() {
    let ws = Workspace::empty();
    ws.file(
        "legacy.json",
        r#"{"version": 1, "agent": {"name": "Old Bot", "model": "sonnet", "system_prompt": "Hi"}}"#,
    );
    let imported =
        ws.deck().args(&["agent", "import", "legacy.json", "-o", "json"]).passes().json();
    assert_eq!(imported["name"], json!("Old Bot"));
    assert_eq!(imported["definition"], json!({"model": "sonnet", "system_prompt": "Hi"}));
}

#[test]
fn unreachable_catalog_fails() {
    let ws = Workspace::empty();
    ws.deck().args(&["agent", "catalog", "list"]).fails_with(1).stderr_has("catalog unavailable");
}
