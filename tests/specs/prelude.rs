// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared harness: an isolated home and state directory plus a fluent
//! wrapper around the `deck` binary.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::process::Output;
use tempfile::TempDir;

pub use serde_json::{json, Value};

pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn empty() -> Self {
        Self { dir: tempfile::tempdir().unwrap() }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn state_dir(&self) -> PathBuf {
        self.path().join("state")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.path().join("home/.claude/settings.json")
    }

    /// Write `contents` at `rel`, creating parent directories.
    pub fn file(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path().join(rel)).unwrap()
    }

    pub fn settings_json(&self) -> Value {
        serde_json::from_str(&std::fs::read_to_string(self.settings_path()).unwrap()).unwrap()
    }

    pub fn deck(&self) -> Deck {
        let mut cmd = Command::cargo_bin("deck").unwrap();
        cmd.current_dir(self.path())
            .env("HOME", self.path().join("home"))
            .env("DECK_STATE_DIR", self.state_dir())
            .env("DECK_SETTINGS_PATH", self.settings_path())
            .env("DECK_CATALOG_URL", "http://127.0.0.1:9/agents")
            .env("DECK_CATALOG_TIMEOUT_SECS", "2")
            .env("NO_COLOR", "1")
            .env_remove("COLOR")
            .env_remove("XDG_STATE_HOME")
            .env_remove("DECK_LOG");
        Deck { cmd }
    }
}

pub fn cli() -> Deck {
    let mut cmd = Command::cargo_bin("deck").unwrap();
    cmd.env("NO_COLOR", "1");
    Deck { cmd }
}

pub struct Deck {
    cmd: Command,
}

impl Deck {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn passes(mut self) -> Finished {
        let output = self.cmd.output().unwrap();
        let finished = Finished { output };
        assert!(
            finished.output.status.success(),
            "expected success, got {:?}\nstdout:\n{}\nstderr:\n{}",
            finished.output.status.code(),
            finished.stdout(),
            finished.stderr()
        );
        finished
    }

    pub fn fails_with(mut self, code: i32) -> Finished {
        let output = self.cmd.output().unwrap();
        let finished = Finished { output };
        assert_eq!(
            finished.output.status.code(),
            Some(code),
            "stdout:\n{}\nstderr:\n{}",
            finished.stdout(),
            finished.stderr()
        );
        finished
    }
}

pub struct Finished {
    output: Output,
}

impl Finished {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(stdout.contains(needle), "stdout missing {needle:?}:\n{stdout}");
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        let stdout = self.stdout();
        assert!(!stdout.contains(needle), "stdout unexpectedly has {needle:?}:\n{stdout}");
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        let stderr = self.stderr();
        assert!(stderr.contains(needle), "stderr missing {needle:?}:\n{stderr}");
        self
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.stdout()).unwrap()
    }
}
