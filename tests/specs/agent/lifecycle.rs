// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Creating, listing, updating, and deleting agents.

use crate::prelude::*;

#[test]
fn empty_store_lists_no_agents() {
    let ws = Workspace::empty();
    ws.deck().args(&["agent", "list"]).passes().stdout_has("No agents");
}

#[test]
fn create_list_delete_round_trip() {
    let ws = Workspace::empty();
    ws.deck()
        .args(&["agent", "create", "Reviewer", "--model", "opus", "--prompt", "Review the diff."])
        .passes()
        .stdout_has("Created agent 'Reviewer'");

    let listed = ws.deck().args(&["agent", "list", "-o", "json"]).passes().json();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["name"], json!("Reviewer"));
    assert_eq!(listed[0]["definition"]["model"], json!("opus"));
    assert!(listed[0]["id"].as_str().unwrap().starts_with("agt-"));

    ws.deck()
        .args(&["agent", "delete", "Reviewer"])
        .passes()
        .stdout_has("Deleted agent 'Reviewer'");
    ws.deck().args(&["agent", "list"]).passes().stdout_has("No agents");
}

#[test]
fn update_replaces_fields_and_keeps_id() {
    let ws = Workspace::empty();
    let created = ws.deck().args(&["agent", "create", "Planner", "-o", "json"]).passes().json();
    let id = created["id"].as_str().unwrap().to_string();

    let updated = ws
        .deck()
        .args(&[
            "agent",
            "update",
            &id,
            "--name",
            "Architect",
            "--set",
            "max_turns=5",
            "-o",
            "json",
        ])
        .passes()
        .json();

    assert_eq!(updated["id"], json!(id));
    assert_eq!(updated["name"], json!("Architect"));
    assert_eq!(updated["definition"]["max_turns"], json!(5));
}

#[test]
fn unknown_agent_exits_not_found() {
    let ws = Workspace::empty();
    ws.deck().args(&["agent", "show", "agt-missing"]).fails_with(2).stderr_has("no agent matches");
    ws.deck().args(&["agent", "list"]).passes().stdout_has("No agents");
}

#[test]
fn blank_name_is_invalid() {
    let ws = Workspace::empty();
    ws.deck().args(&["agent", "create", "   "]).fails_with(3).stderr_has("name must not be empty");
}

#[test]
fn agents_persist_in_state_dir() {
    let ws = Workspace::empty();
    ws.deck().args(&["agent", "create", "Reviewer"]).passes();
    let stored: Value = serde_json::from_str(&ws.read("state/agents.json")).unwrap();
    assert_eq!(stored["v"], json!(1));
    assert_eq!(stored["agents"][0]["name"], json!("Reviewer"));
}

#[test]
fn empty_list_hint_can_be_turned_off() {
    let ws = Workspace::empty();
    ws.deck().args(&["agent", "list"]).passes().stdout_has("deck agent create");

    ws.deck().args(&["settings", "intro", "off"]).passes().stdout_has("intro: off");
    ws.deck()
        .args(&["agent", "list"])
        .passes()
        .stdout_has("No agents")
        .stdout_lacks("deck agent create");

    let prefs: Value = serde_json::from_str(&ws.read("state/prefs.json")).unwrap();
    assert_eq!(prefs["startup_intro_enabled"], json!("false"));
}
