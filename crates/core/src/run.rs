// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run records.
//!
//! A run record is what the execution subsystem reports about one launch of
//! an agent. Records are keyed by an id the execution subsystem assigns, and
//! remember the agent's name at launch so history survives renames and
//! deletion of the agent itself.

use crate::agent::AgentId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

crate::define_id! {
    /// Identifier assigned by the execution subsystem when a run starts.
    pub struct RunId("run-");
}

/// Lifecycle of a run: `pending → running → {completed, failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    /// Position in the lifecycle lattice. Both terminal states share a rank.
    pub fn rank(self) -> u8 {
        match self {
            RunStatus::Pending => 0,
            RunStatus::Running => 1,
            RunStatus::Completed | RunStatus::Failed => 2,
        }
    }

    /// Whether this status is terminal (no further transitions expected)
    pub fn is_terminal(self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed)
    }
}

crate::simple_display! {
    RunStatus {
        Pending => "pending",
        Running => "running",
        Completed => "completed",
        Failed => "failed",
    }
}

/// Live metrics, filled in while the run progresses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_usd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: RunId,
    pub agent_id: AgentId,
    /// Agent name captured at launch
    pub agent_name: String,
    pub status: RunStatus,
    /// Epoch milliseconds when the run was launched
    pub started_at_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<RunMetrics>,
    /// Working directory the run was launched in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_path: Option<PathBuf>,
}

impl RunRecord {
    /// Seconds the run has taken so far.
    ///
    /// Reported duration wins when the execution subsystem supplied one;
    /// otherwise a live run is measured against `now_ms` and a finished run
    /// without a duration reports `None`.
    pub fn elapsed_secs(&self, now_ms: u64) -> Option<u64> {
        if let Some(ms) = self.metrics.as_ref().and_then(|m| m.duration_ms) {
            return Some(ms / 1000);
        }
        if self.status.is_terminal() {
            return None;
        }
        Some(now_ms.saturating_sub(self.started_at_ms) / 1000)
    }

    pub fn total_tokens(&self) -> Option<u64> {
        self.metrics.as_ref().and_then(|m| m.total_tokens)
    }
}

crate::builder! {
    pub struct RunRecordBuilder => RunRecord {
        into {
            id: RunId = "run-1",
            agent_id: AgentId = "agt-1",
            agent_name: String = "reviewer",
        }
        set {
            status: RunStatus = RunStatus::Running,
            started_at_ms: u64 = 1_000_000,
        }
        option {
            metrics: RunMetrics = None,
            project_path: PathBuf = None,
        }
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
