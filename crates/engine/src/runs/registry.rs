// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cached view of run records.
//!
//! The cache only ever moves a run forward through its lifecycle. Batches
//! from the execution subsystem may be stale or arrive out of order; a record
//! whose status ranks below the cached one is ignored, and a run that has
//! reached a terminal state is frozen along with its final metrics.

use deck_core::{AgentId, RunId, RunRecord};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Outcome of merging one batch into the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub added: Vec<RunId>,
    pub updated: Vec<RunId>,
    pub unchanged: Vec<RunId>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty()
    }
}

enum Merge {
    Added,
    Updated,
    Unchanged,
}

/// Shared, cheaply clonable run cache.
#[derive(Debug, Clone, Default)]
pub struct RunRegistry {
    runs: Arc<RwLock<HashMap<RunId, RunRecord>>>,
}

impl RunRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All cached runs, newest first.
    pub fn list_with_metrics(&self) -> Vec<RunRecord> {
        let mut runs: Vec<_> = self.runs.read().values().cloned().collect();
        sort_newest_first(&mut runs);
        runs
    }

    pub fn get(&self, id: &RunId) -> Option<RunRecord> {
        self.runs.read().get(id).cloned()
    }

    /// Cached runs launched from `agent_id`, newest first.
    pub fn runs_for_agent(&self, agent_id: &AgentId) -> Vec<RunRecord> {
        let mut runs: Vec<_> =
            self.runs.read().values().filter(|r| &r.agent_id == agent_id).cloned().collect();
        sort_newest_first(&mut runs);
        runs
    }

    pub fn len(&self) -> usize {
        self.runs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.read().is_empty()
    }

    /// Merge a fetched batch. Ids missing from the batch stay cached.
    pub fn reconcile(&self, batch: Vec<RunRecord>) -> ChangeSet {
        let mut changes = ChangeSet::default();
        let mut runs = self.runs.write();
        for incoming in batch {
            let id = incoming.id.clone();
            match merge(&mut runs, incoming) {
                Merge::Added => changes.added.push(id),
                Merge::Updated => changes.updated.push(id),
                Merge::Unchanged => changes.unchanged.push(id),
            }
        }
        tracing::debug!(
            added = changes.added.len(),
            updated = changes.updated.len(),
            unchanged = changes.unchanged.len(),
            "reconciled runs"
        );
        changes
    }

    /// Insert the initial record of a fresh launch.
    pub fn record_launch(&self, record: RunRecord) -> ChangeSet {
        self.reconcile(vec![record])
    }
}

fn merge(runs: &mut HashMap<RunId, RunRecord>, mut incoming: RunRecord) -> Merge {
    let Some(cached) = runs.get_mut(&incoming.id) else {
        runs.insert(incoming.id.clone(), incoming);
        return Merge::Added;
    };

    if cached.status.is_terminal() {
        if incoming.status != cached.status {
            tracing::debug!(
                run_id = %cached.id,
                cached = %cached.status,
                incoming = %incoming.status,
                "ignoring update to finished run"
            );
        }
        return Merge::Unchanged;
    }

    if incoming.status.rank() < cached.status.rank() {
        tracing::debug!(
            run_id = %cached.id,
            cached = %cached.status,
            incoming = %incoming.status,
            "ignoring stale run status"
        );
        return Merge::Unchanged;
    }

    if incoming.metrics.is_none() {
        incoming.metrics = cached.metrics.clone();
    }
    if *cached == incoming {
        return Merge::Unchanged;
    }
    *cached = incoming;
    Merge::Updated
}

fn sort_newest_first(runs: &mut [RunRecord]) {
    runs.sort_by(|a, b| b.started_at_ms.cmp(&a.started_at_ms).then_with(|| a.id.cmp(&b.id)));
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
