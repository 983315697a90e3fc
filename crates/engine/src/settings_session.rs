// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One editing pass over the tool settings.
//!
//! The document is loaded once. Permission and environment rows are edited
//! through their editors and folded back in on save. Editors that were never
//! touched leave their part of the document exactly as loaded.

use deck_core::{EnvironmentMap, KnownField, PermissionRuleSet, SettingsDocument};
use deck_storage::{Preferences, PrefsError, SettingsError, SettingsPersistence, BINARY_PATH_KEY};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Prefs(#[from] PrefsError),
}

pub struct SettingsSession {
    persistence: Arc<dyn SettingsPersistence>,
    prefs: Arc<Preferences>,
    document: SettingsDocument,
    permissions: PermissionRuleSet,
    env: EnvironmentMap,
    permissions_dirty: bool,
    env_dirty: bool,
    /// `Some(None)` clears the stored path.
    staged_binary: Option<Option<String>>,
}

impl SettingsSession {
    /// Load the settings. Unparseable content starts an empty document; only
    /// an unreadable file is an error.
    pub fn load(
        persistence: Arc<dyn SettingsPersistence>,
        prefs: Arc<Preferences>,
    ) -> Result<Self, SessionError> {
        let raw = persistence.load_raw()?;
        let document = SettingsDocument::load(&raw);
        Ok(Self {
            permissions: PermissionRuleSet::from_document(&document),
            env: EnvironmentMap::from_document(&document),
            persistence,
            prefs,
            document,
            permissions_dirty: false,
            env_dirty: false,
            staged_binary: None,
        })
    }

    /// Document as last loaded or saved, without pending editor rows.
    pub fn document(&self) -> &SettingsDocument {
        &self.document
    }

    pub fn permissions(&self) -> &PermissionRuleSet {
        &self.permissions
    }

    pub fn permissions_mut(&mut self) -> &mut PermissionRuleSet {
        self.permissions_dirty = true;
        &mut self.permissions
    }

    pub fn env(&self) -> &EnvironmentMap {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut EnvironmentMap {
        self.env_dirty = true;
        &mut self.env
    }

    pub fn set(&mut self, field: KnownField) {
        self.document.set(field);
    }

    pub fn set_extra(&mut self, key: impl Into<String>, value: Value) {
        self.document.set_extra(key, value);
    }

    pub fn remove_extra(&mut self, key: &str) -> Option<Value> {
        self.document.remove_extra(key)
    }

    /// Stage a tool binary path, written to preferences on save.
    pub fn stage_binary_path(&mut self, path: Option<String>) {
        self.staged_binary = Some(path);
    }

    /// Binary path that a save would leave in effect.
    pub fn binary_path(&self) -> Option<String> {
        match &self.staged_binary {
            Some(staged) => staged.clone(),
            None => self.prefs.get(BINARY_PATH_KEY),
        }
    }

    /// The document a save would write.
    pub fn merged(&self) -> SettingsDocument {
        let mut doc = self.document.clone();
        if self.permissions_dirty {
            doc = self.permissions.apply_to(doc);
        }
        if self.env_dirty {
            doc = self.env.apply_to(doc);
        }
        doc
    }

    /// Write the merged document in one replace, then the staged binary path.
    ///
    /// On failure the session keeps every pending edit so the save can be
    /// retried.
    pub fn save(&mut self) -> Result<(), SessionError> {
        let merged = self.merged();
        self.persistence.save_raw(&merged.serialize())?;
        self.document = merged;
        self.permissions = PermissionRuleSet::from_document(&self.document);
        self.env = EnvironmentMap::from_document(&self.document);
        self.permissions_dirty = false;
        self.env_dirty = false;

        if let Some(staged) = self.staged_binary.take() {
            let result = match &staged {
                Some(path) => self.prefs.set(BINARY_PATH_KEY, path.as_str()),
                None => self.prefs.remove(BINARY_PATH_KEY),
            };
            if let Err(e) = result {
                self.staged_binary = Some(staged);
                return Err(e.into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_session_tests.rs"]
mod tests;
