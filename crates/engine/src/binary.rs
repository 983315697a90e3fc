// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Locating the tool binary and remembering the user's choice.

use deck_storage::{Preferences, PrefsError, BINARY_PATH_KEY};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const BINARY_NAME: &str = "claude";

#[derive(Debug, Error)]
pub enum BinaryError {
    #[error("no executable at {0}")]
    NotFound(PathBuf),
    #[error(transparent)]
    Prefs(#[from] PrefsError),
}

/// Where an installation was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallSource {
    Path,
    Homebrew,
    System,
    ClaudeLocal,
    LocalBin,
    Nvm,
}

deck_core::simple_display! {
    InstallSource {
        Path => "PATH",
        Homebrew => "homebrew",
        System => "system",
        ClaudeLocal => "claude-local",
        LocalBin => "local-bin",
        Nvm => "nvm",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    pub path: PathBuf,
    pub source: InstallSource,
}

/// Installations on this machine, in search order, without duplicates.
pub fn discover_installations() -> Vec<Installation> {
    let dirs = search_dirs(std::env::var_os("PATH"), dirs::home_dir().as_deref());
    discover_in(&dirs)
}

/// Directories to search: `PATH` entries first, then well-known locations.
pub fn search_dirs(
    path_var: Option<OsString>,
    home: Option<&Path>,
) -> Vec<(PathBuf, InstallSource)> {
    let mut dirs: Vec<_> = path_var
        .map(|p| std::env::split_paths(&p).map(|d| (d, InstallSource::Path)).collect())
        .unwrap_or_default();
    dirs.push((PathBuf::from("/opt/homebrew/bin"), InstallSource::Homebrew));
    dirs.push((PathBuf::from("/usr/local/bin"), InstallSource::System));
    if let Some(home) = home {
        dirs.push((home.join(".claude/local"), InstallSource::ClaudeLocal));
        dirs.push((home.join(".local/bin"), InstallSource::LocalBin));
        dirs.extend(nvm_bin_dirs(home).into_iter().map(|d| (d, InstallSource::Nvm)));
    }
    dirs
}

fn nvm_bin_dirs(home: &Path) -> Vec<PathBuf> {
    let root = glob::Pattern::escape(&home.join(".nvm/versions/node").to_string_lossy());
    let pattern = format!("{root}/*/bin");
    match glob::glob(&pattern) {
        Ok(paths) => paths.filter_map(Result::ok).filter(|p| p.is_dir()).collect(),
        Err(e) => {
            tracing::debug!(error = %e, "bad nvm search pattern");
            Vec::new()
        }
    }
}

pub fn discover_in(dirs: &[(PathBuf, InstallSource)]) -> Vec<Installation> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    for (dir, source) in dirs {
        let candidate = dir.join(BINARY_NAME);
        if !is_executable(&candidate) {
            continue;
        }
        let key = std::fs::canonicalize(&candidate).unwrap_or_else(|_| candidate.clone());
        if seen.insert(key) {
            found.push(Installation { path: candidate, source: *source });
        }
    }
    tracing::debug!(count = found.len(), "discovered installations");
    found
}

fn is_executable(path: &Path) -> bool {
    let Ok(meta) = std::fs::metadata(path) else {
        return false;
    };
    if !meta.is_file() {
        return false;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        meta.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}

/// Remember `path` as the binary to use. It must be an existing executable.
pub fn select_binary(prefs: &Preferences, path: &Path) -> Result<(), BinaryError> {
    if !is_executable(path) {
        return Err(BinaryError::NotFound(path.to_path_buf()));
    }
    prefs.set(BINARY_PATH_KEY, path.to_string_lossy())?;
    tracing::info!(path = %path.display(), "selected tool binary");
    Ok(())
}

pub fn current_binary(prefs: &Preferences) -> Option<PathBuf> {
    prefs.get(BINARY_PATH_KEY).filter(|p| !p.is_empty()).map(PathBuf::from)
}

#[cfg(test)]
#[path = "binary_tests.rs"]
mod tests;
