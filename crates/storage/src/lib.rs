// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! deck-storage: on-disk state for agents, tool settings, and preferences

mod agents;
mod atomic;
mod prefs;
mod settings_file;

pub use agents::{AgentStore, FileAgentStore, MemoryAgentStore, StoreError, AGENTS_FILE_VERSION};
pub use atomic::write_atomic;
pub use prefs::{PrefsError, Preferences, BINARY_PATH_KEY, STARTUP_INTRO_KEY};
pub use settings_file::{MemorySettings, SettingsError, SettingsFile, SettingsPersistence};
