// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Opening the on-disk state that commands work against.

use anyhow::{Context as _, Result};
use deck_engine::env;
use deck_storage::{FileAgentStore, Preferences, SettingsFile};
use std::sync::Arc;

pub fn agent_store() -> Result<FileAgentStore> {
    let path = env::agents_path()?;
    FileAgentStore::open(&path).with_context(|| format!("opening agents at {}", path.display()))
}

pub fn preferences() -> Result<Arc<Preferences>> {
    let path = env::prefs_path()?;
    let prefs = Preferences::open(&path)
        .with_context(|| format!("opening preferences at {}", path.display()))?;
    Ok(Arc::new(prefs))
}

pub fn settings_file() -> Result<Arc<SettingsFile>> {
    Ok(Arc::new(SettingsFile::new(env::settings_path()?)))
}
