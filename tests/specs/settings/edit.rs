// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Editing the tool settings document.

use crate::prelude::*;

const EXISTING: &str = r#"{
  "permissions": {"allow": ["Read"], "deny": [], "defaultMode": "acceptEdits"},
  "model": "opus",
  "statusLine": {"type": "command", "command": "~/.claude/status.sh", "padding": 0},
  "cleanupPeriodDays": 20
}"#;

#[test]
fn allow_rule_is_added_and_unknown_fields_survive() {
    let ws = Workspace::empty();
    ws.file("home/.claude/settings.json", EXISTING);

    ws.deck().args(&["settings", "allow", "add", "Bash(npm run test:*)"]).passes();

    let saved = ws.settings_json();
    assert_eq!(saved["permissions"]["allow"], json!(["Read", "Bash(npm run test:*)"]));
    assert_eq!(saved["permissions"]["defaultMode"], json!("acceptEdits"));
    assert_eq!(saved["model"], json!("opus"));
    assert_eq!(saved["statusLine"]["padding"], json!(0));
    assert_eq!(saved["cleanupPeriodDays"], json!(20));
}

#[test]
fn blank_rule_is_dropped_on_save() {
    let ws = Workspace::empty();
    ws.deck().args(&["settings", "deny", "add", "  "]).passes();
    assert_eq!(ws.settings_json()["permissions"]["deny"], json!([]));
}

#[test]
fn removing_missing_rule_is_not_found() {
    let ws = Workspace::empty();
    ws.file("home/.claude/settings.json", EXISTING);
    ws.deck().args(&["settings", "deny", "remove", "Bash(rm:*)"]).fails_with(2);
}

#[test]
fn env_set_overwrites_and_unset_removes() {
    let ws = Workspace::empty();
    ws.deck().args(&["settings", "env", "set", "MODE", "a"]).passes();
    ws.deck().args(&["settings", "env", "set", "MODE", "b"]).passes();
    ws.deck().args(&["settings", "env", "set", "OTHER", "x"]).passes();
    assert_eq!(ws.settings_json()["env"], json!({"MODE": "b", "OTHER": "x"}));

    ws.deck().args(&["settings", "env", "unset", "MODE"]).passes();
    assert_eq!(ws.settings_json()["env"], json!({"OTHER": "x"}));
}

#[test]
fn known_fields_set_and_clear() {
    let ws = Workspace::empty();
    ws.file("home/.claude/settings.json", EXISTING);

    ws.deck().args(&["settings", "set", "verbose", "true"]).passes();
    ws.deck().args(&["settings", "set", "cleanup-period-days"]).passes();

    let saved = ws.settings_json();
    assert_eq!(saved["verbose"], json!(true));
    assert!(saved.get("cleanupPeriodDays").is_none());
}

#[test]
fn malformed_settings_show_as_empty() {
    let ws = Workspace::empty();
    ws.file("home/.claude/settings.json", "{ this is not json");

    let shown = ws.deck().args(&["settings", "show", "-o", "json"]).passes().json();
    assert_eq!(shown["settings"], json!({}));
}
