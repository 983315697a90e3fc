// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent persistence.
//!
//! Both stores keep the full table in memory behind a mutex. The file-backed
//! store applies each mutation to a copy, writes the copy to disk, and only
//! then swaps it in, so a failed write leaves the previous table in place.

use crate::atomic::write_atomic;
use deck_core::{Agent, AgentDraft, AgentError, AgentId};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// On-disk format version of the agents file.
pub const AGENTS_FILE_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("agent not found: {0}")]
    NotFound(AgentId),
    #[error("invalid agent: {0}")]
    InvalidAgent(#[from] AgentError),
    #[error("failed to persist agents to {path}: {source}")]
    PersistenceFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("agents file {path} is unreadable: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Durable collection of agents keyed by id.
pub trait AgentStore: Send + Sync {
    /// All agents in insertion order.
    fn list(&self) -> Vec<Agent>;

    fn get(&self, id: &AgentId) -> Result<Agent, StoreError>;

    /// Store a new agent under a fresh id.
    fn create(&self, draft: AgentDraft) -> Result<Agent, StoreError>;

    /// Replace the agent stored under `id`. Never creates.
    fn update(&self, id: &AgentId, draft: AgentDraft) -> Result<Agent, StoreError>;

    fn delete(&self, id: &AgentId) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct AgentTable {
    agents: Vec<Agent>,
}

impl AgentTable {
    fn position(&self, id: &AgentId) -> Option<usize> {
        self.agents.iter().position(|a| a.id.as_ref() == Some(id))
    }

    fn get(&self, id: &AgentId) -> Result<Agent, StoreError> {
        self.position(id)
            .map(|idx| self.agents[idx].clone())
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn fresh_id(&self) -> AgentId {
        loop {
            let id = AgentId::new();
            if self.position(&id).is_none() {
                return id;
            }
        }
    }

    fn create(&mut self, draft: AgentDraft) -> Result<Agent, StoreError> {
        draft.validate()?;
        let agent = draft.into_agent(self.fresh_id());
        self.agents.push(agent.clone());
        Ok(agent)
    }

    fn update(&mut self, id: &AgentId, draft: AgentDraft) -> Result<Agent, StoreError> {
        let idx = self.position(id).ok_or_else(|| StoreError::NotFound(id.clone()))?;
        draft.validate()?;
        let agent = draft.into_agent(id.clone());
        self.agents[idx] = agent.clone();
        Ok(agent)
    }

    fn delete(&mut self, id: &AgentId) -> Result<(), StoreError> {
        let idx = self.position(id).ok_or_else(|| StoreError::NotFound(id.clone()))?;
        self.agents.remove(idx);
        Ok(())
    }
}

/// Non-persistent store.
#[derive(Debug, Default)]
pub struct MemoryAgentStore {
    table: Mutex<AgentTable>,
}

impl MemoryAgentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AgentStore for MemoryAgentStore {
    fn list(&self) -> Vec<Agent> {
        self.table.lock().agents.clone()
    }

    fn get(&self, id: &AgentId) -> Result<Agent, StoreError> {
        self.table.lock().get(id)
    }

    fn create(&self, draft: AgentDraft) -> Result<Agent, StoreError> {
        self.table.lock().create(draft)
    }

    fn update(&self, id: &AgentId, draft: AgentDraft) -> Result<Agent, StoreError> {
        self.table.lock().update(id, draft)
    }

    fn delete(&self, id: &AgentId) -> Result<(), StoreError> {
        self.table.lock().delete(id)
    }
}

#[derive(Serialize)]
struct AgentsFileRef<'a> {
    v: u32,
    agents: &'a [Agent],
}

#[derive(Deserialize)]
struct AgentsFile {
    #[serde(default)]
    v: u32,
    #[serde(default)]
    agents: Vec<Agent>,
}

/// Store backed by a single JSON file, rewritten whole on every mutation.
#[derive(Debug)]
pub struct FileAgentStore {
    path: PathBuf,
    table: Mutex<AgentTable>,
}

impl FileAgentStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let table = match std::fs::read(&path) {
            Ok(bytes) => {
                let file: AgentsFile = serde_json::from_slice(&bytes)
                    .map_err(|source| StoreError::Corrupt { path: path.clone(), source })?;
                if file.v > AGENTS_FILE_VERSION {
                    tracing::warn!(
                        path = %path.display(),
                        version = file.v,
                        "agents file written by a newer version"
                    );
                }
                AgentTable { agents: file.agents }
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => AgentTable::default(),
            Err(source) => return Err(StoreError::PersistenceFailed { path, source }),
        };
        tracing::debug!(path = %path.display(), count = table.agents.len(), "opened agent store");
        Ok(Self { path, table: Mutex::new(table) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, table: &AgentTable) -> Result<(), StoreError> {
        let file = AgentsFileRef { v: AGENTS_FILE_VERSION, agents: &table.agents };
        let bytes = serde_json::to_vec_pretty(&file).map_err(|e| StoreError::PersistenceFailed {
            path: self.path.clone(),
            source: e.into(),
        })?;
        write_atomic(&self.path, &bytes)
            .map_err(|source| StoreError::PersistenceFailed { path: self.path.clone(), source })
    }

    /// Apply `op` to a copy of the table, persist it, then commit.
    fn mutate<T>(
        &self,
        op: impl FnOnce(&mut AgentTable) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut guard = self.table.lock();
        let mut next = guard.clone();
        let out = op(&mut next)?;
        if let Err(e) = self.persist(&next) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "agent write failed, keeping previous state"
            );
            return Err(e);
        }
        *guard = next;
        Ok(out)
    }
}

impl AgentStore for FileAgentStore {
    fn list(&self) -> Vec<Agent> {
        self.table.lock().agents.clone()
    }

    fn get(&self, id: &AgentId) -> Result<Agent, StoreError> {
        self.table.lock().get(id)
    }

    fn create(&self, draft: AgentDraft) -> Result<Agent, StoreError> {
        let agent = self.mutate(|t| t.create(draft))?;
        if let Some(id) = &agent.id {
            tracing::info!(agent_id = %id, name = %agent.name, "agent created");
        }
        Ok(agent)
    }

    fn update(&self, id: &AgentId, draft: AgentDraft) -> Result<Agent, StoreError> {
        let agent = self.mutate(|t| t.update(id, draft))?;
        tracing::info!(agent_id = %id, "agent updated");
        Ok(agent)
    }

    fn delete(&self, id: &AgentId) -> Result<(), StoreError> {
        self.mutate(|t| t.delete(id))?;
        tracing::info!(agent_id = %id, "agent deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "agents_tests.rs"]
mod tests;
