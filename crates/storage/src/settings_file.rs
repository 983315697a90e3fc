// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Raw access to the tool's settings file.

use crate::atomic::write_atomic;
use parking_lot::Mutex;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings at {path}: {source}")]
    PersistenceFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Load and replace the raw settings text. Parsing is the caller's concern.
pub trait SettingsPersistence: Send + Sync {
    fn load_raw(&self) -> Result<String, SettingsError>;
    fn save_raw(&self, raw: &str) -> Result<(), SettingsError>;
}

/// Settings stored in a JSON file. A missing file reads as empty text.
#[derive(Debug, Clone)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsPersistence for SettingsFile {
    fn load_raw(&self) -> Result<String, SettingsError> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(raw),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(source) => {
                Err(SettingsError::PersistenceFailed { path: self.path.clone(), source })
            }
        }
    }

    fn save_raw(&self, raw: &str) -> Result<(), SettingsError> {
        write_atomic(&self.path, raw.as_bytes()).map_err(|source| {
            SettingsError::PersistenceFailed { path: self.path.clone(), source }
        })?;
        tracing::info!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

/// In-memory settings text, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySettings {
    raw: Mutex<String>,
}

impl MemorySettings {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: Mutex::new(raw.into()) }
    }

    pub fn contents(&self) -> String {
        self.raw.lock().clone()
    }
}

impl SettingsPersistence for MemorySettings {
    fn load_raw(&self) -> Result<String, SettingsError> {
        Ok(self.raw.lock().clone())
    }

    fn save_raw(&self, raw: &str) -> Result<(), SettingsError> {
        *self.raw.lock() = raw.to_string();
        Ok(())
    }
}

#[cfg(test)]
#[path = "settings_file_tests.rs"]
mod tests;
