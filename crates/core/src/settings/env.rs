// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Row editor for the `env` map.

use super::{is_blank, LocalId, LocalIds, SettingsDocument};
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentEntry {
    pub local_id: LocalId,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct EnvironmentMap {
    entries: Vec<EnvironmentEntry>,
    ids: LocalIds,
}

impl EnvironmentMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(doc: &SettingsDocument) -> Self {
        let mut map = Self::new();
        for (key, value) in doc.env_rows() {
            map.add(key, value);
        }
        map
    }

    pub fn entries(&self) -> &[EnvironmentEntry] {
        &self.entries
    }

    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) -> LocalId {
        let local_id = self.ids.issue();
        self.entries.push(EnvironmentEntry { local_id, key: key.into(), value: value.into() });
        local_id
    }

    pub fn set_key(&mut self, local_id: LocalId, key: impl Into<String>) -> bool {
        let Some(entry) = self.find_mut(local_id) else {
            return false;
        };
        entry.key = key.into();
        true
    }

    pub fn set_value(&mut self, local_id: LocalId, value: impl Into<String>) -> bool {
        let Some(entry) = self.find_mut(local_id) else {
            return false;
        };
        entry.value = value.into();
        true
    }

    pub fn remove(&mut self, local_id: LocalId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.local_id != local_id);
        before != self.entries.len()
    }

    /// Key → value map for saving.
    ///
    /// Rows with a blank key or a blank value are dropped. A repeated key
    /// keeps the value of its last row, at the position of its first.
    pub fn collapse(&self) -> IndexMap<String, String> {
        let mut env = IndexMap::new();
        for entry in &self.entries {
            if is_blank(&entry.key) || is_blank(&entry.value) {
                continue;
            }
            env.insert(entry.key.clone(), entry.value.clone());
        }
        env
    }

    pub fn apply_to(&self, doc: SettingsDocument) -> SettingsDocument {
        doc.with_env(self.collapse())
    }

    fn find_mut(&mut self, local_id: LocalId) -> Option<&mut EnvironmentEntry> {
        self.entries.iter_mut().find(|e| e.local_id == local_id)
    }
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
