// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Selecting the tool binary.

use crate::prelude::*;

#[test]
fn binary_unset_by_default() {
    let ws = Workspace::empty();
    ws.deck().args(&["settings", "binary", "show"]).passes().stdout_has("(not set)");
}

#[test]
fn selecting_missing_binary_fails() {
    let ws = Workspace::empty();
    ws.deck().args(&["settings", "binary", "set", "/nonexistent/claude"]).fails_with(3);
}

#[cfg(unix)]
#[test]
fn selected_binary_is_remembered() {
    use std::os::unix::fs::PermissionsExt;

    let ws = Workspace::empty();
    let bin = ws.file("home/.local/bin/claude", "#!/bin/sh\n");
    std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755)).unwrap();
    let bin = bin.to_string_lossy().into_owned();

    ws.deck().args(&["settings", "binary", "set", &bin]).passes();
    ws.deck().args(&["settings", "binary", "show"]).passes().stdout_has(&bin);
    ws.deck()
        .args(&["settings", "binary", "list"])
        .passes()
        .stdout_has(&bin)
        .stdout_has("local-bin");

    let prefs: Value = serde_json::from_str(&ws.read("state/prefs.json")).unwrap();
    assert_eq!(prefs["claude_binary_path"], json!(bin));
}
