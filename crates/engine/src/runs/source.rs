// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Collaborators owned by the execution subsystem.

use async_trait::async_trait;
use deck_core::{AgentId, RunRecord};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunSourceError {
    #[error("failed to read runs from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed runs in {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("run source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("agent has not been saved yet")]
    UnsavedAgent,
    #[error("launch failed: {0}")]
    Failed(String),
}

/// Reports the current state of every run it knows about.
#[async_trait]
pub trait RunSource: Send + Sync + 'static {
    async fn fetch_runs(&self) -> Result<Vec<RunRecord>, RunSourceError>;
}

/// Starts runs. Returns the initial record of the new run.
#[async_trait]
pub trait RunLauncher: Send + Sync + 'static {
    async fn launch(
        &self,
        agent_id: &AgentId,
        agent_name: &str,
        cwd: &Path,
    ) -> Result<RunRecord, LaunchError>;
}

/// Reads a JSON array of run records written by the execution subsystem.
///
/// A missing file means no runs have been reported yet.
#[derive(Debug, Clone)]
pub struct FileRunSource {
    path: PathBuf,
}

impl FileRunSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RunSource for FileRunSource {
    async fn fetch_runs(&self) -> Result<Vec<RunRecord>, RunSourceError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(RunSourceError::Io { path: self.path.clone(), source }),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes)
            .map_err(|source| RunSourceError::Malformed { path: self.path.clone(), source })
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
