// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn creates_parents_and_replaces_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/state/file.json");

    write_atomic(&path, b"first").unwrap();
    write_atomic(&path, b"second").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    assert!(!dir.path().join("nested/state/file.json.tmp").exists());
}

#[test]
fn failed_rename_leaves_target_untouched() {
    let dir = tempfile::tempdir().unwrap();
    // A directory at the target path makes the rename fail.
    let path = dir.path().join("occupied");
    fs::create_dir_all(path.join("child")).unwrap();

    assert!(write_atomic(&path, b"data").is_err());
    assert!(path.join("child").is_dir());
    assert!(!dir.path().join("occupied.tmp").exists());
}
