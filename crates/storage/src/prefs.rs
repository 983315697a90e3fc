// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Application preferences that live outside the tool's settings document.

use crate::atomic::write_atomic;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Path of the tool binary chosen by the user.
pub const BINARY_PATH_KEY: &str = "claude_binary_path";
/// Whether the intro screen is shown on startup.
pub const STARTUP_INTRO_KEY: &str = "startup_intro_enabled";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to write preferences to {path}: {source}")]
    PersistenceFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("preferences file {path} is unreadable: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Key → string store backed by a JSON object file.
///
/// `path == None` keeps everything in memory.
#[derive(Debug, Default)]
pub struct Preferences {
    path: Option<PathBuf>,
    values: Mutex<BTreeMap<String, String>>,
}

impl Preferences {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the preferences at `path`. A missing file has no preferences.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let values = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|source| PrefsError::Corrupt { path: path.clone(), source })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(PrefsError::PersistenceFailed { path, source }),
        };
        Ok(Self { path: Some(path), values: Mutex::new(values) })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }

    /// Boolean view of a preference: `"true"` / `"false"`, otherwise `default`.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key).as_deref() {
            Some("true") => true,
            Some("false") => false,
            _ => default,
        }
    }

    pub fn set(&self, key: &str, value: impl Into<String>) -> Result<(), PrefsError> {
        let value = value.into();
        self.mutate(|values| {
            values.insert(key.to_string(), value);
        })
    }

    pub fn remove(&self, key: &str) -> Result<(), PrefsError> {
        self.mutate(|values| {
            values.remove(key);
        })
    }

    fn mutate(&self, op: impl FnOnce(&mut BTreeMap<String, String>)) -> Result<(), PrefsError> {
        let mut guard = self.values.lock();
        let mut next = guard.clone();
        op(&mut next);
        if let Some(path) = &self.path {
            let bytes = serde_json::to_vec_pretty(&next).map_err(|e| PrefsError::PersistenceFailed {
                path: path.clone(),
                source: e.into(),
            })?;
            write_atomic(path, &bytes)
                .map_err(|source| PrefsError::PersistenceFailed { path: path.clone(), source })?;
        }
        *guard = next;
        Ok(())
    }
}

#[cfg(test)]
#[path = "prefs_tests.rs"]
mod tests;
