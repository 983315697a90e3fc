// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The tool's settings document and the row editors layered on it.

mod document;
mod env;
mod permissions;

pub use document::{KnownField, SettingsDocument};
pub use env::{EnvironmentEntry, EnvironmentMap};
pub use permissions::{PermissionKind, PermissionRule, PermissionRuleSet};

/// Row handle inside one editing session.
///
/// Only meaningful to the editor that issued it; never persisted and
/// unrelated to any store id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocalId(u64);

impl LocalId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for LocalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic issuer of [`LocalId`]s for one editor.
#[derive(Debug, Clone, Default)]
struct LocalIds {
    next: u64,
}

impl LocalIds {
    fn issue(&mut self) -> LocalId {
        let id = LocalId(self.next);
        self.next += 1;
        id
    }
}

/// Required-field rule shared by both editors.
fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
