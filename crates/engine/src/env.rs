// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the engine crate.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default interval between run polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Default catalog request timeout.
pub const DEFAULT_CATALOG_TIMEOUT: Duration = Duration::from_secs(15);

/// Listing of shared agent definitions.
pub const DEFAULT_CATALOG_URL: &str =
    "https://api.github.com/repos/getAsterisk/claudia/contents/cc_agents";

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("cannot determine home directory; set DECK_STATE_DIR")]
    NoHome,
}

/// Resolve state directory: DECK_STATE_DIR > XDG_STATE_HOME/deck > ~/.local/state/deck
pub fn state_dir() -> Result<PathBuf, EnvError> {
    if let Some(dir) = non_empty("DECK_STATE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Ok(PathBuf::from(xdg).join("deck"));
    }
    let home = dirs::home_dir().ok_or(EnvError::NoHome)?;
    Ok(home.join(".local/state/deck"))
}

pub fn agents_path() -> Result<PathBuf, EnvError> {
    Ok(state_dir()?.join("agents.json"))
}

pub fn prefs_path() -> Result<PathBuf, EnvError> {
    Ok(state_dir()?.join("prefs.json"))
}

/// Run records written by the execution subsystem.
pub fn runs_path() -> Result<PathBuf, EnvError> {
    Ok(state_dir()?.join("runs.json"))
}

/// Tool settings file: DECK_SETTINGS_PATH > ~/.claude/settings.json
pub fn settings_path() -> Result<PathBuf, EnvError> {
    if let Some(path) = non_empty("DECK_SETTINGS_PATH") {
        return Ok(PathBuf::from(path));
    }
    let home = dirs::home_dir().ok_or(EnvError::NoHome)?;
    Ok(home.join(".claude/settings.json"))
}

/// Run poll interval (default 3s, configurable via `DECK_POLL_INTERVAL_MS`).
pub fn poll_interval() -> Duration {
    std::env::var("DECK_POLL_INTERVAL_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_POLL_INTERVAL)
}

pub fn catalog_url() -> String {
    non_empty("DECK_CATALOG_URL").unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string())
}

pub fn catalog_timeout() -> Duration {
    std::env::var("DECK_CATALOG_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_CATALOG_TIMEOUT)
}

fn non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
