// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run tracking: the cached registry, its poll loop, and launching.

mod poller;
mod registry;
mod source;

pub use poller::RunPoller;
pub use registry::{ChangeSet, RunRegistry};
pub use source::{FileRunSource, LaunchError, RunLauncher, RunSource, RunSourceError};

use deck_core::{Agent, RunRecord};
use std::path::Path;

/// Start a run of `agent` in `cwd` and record its initial state.
pub async fn launch(
    registry: &RunRegistry,
    launcher: &dyn RunLauncher,
    agent: &Agent,
    cwd: &Path,
) -> Result<RunRecord, LaunchError> {
    let agent_id = agent.id.as_ref().ok_or(LaunchError::UnsavedAgent)?;
    let record = launcher.launch(agent_id, &agent.name, cwd).await?;
    tracing::info!(
        run_id = %record.id,
        agent_id = %agent_id,
        cwd = %cwd.display(),
        "run launched"
    );
    registry.record_launch(record.clone());
    Ok(record)
}

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;
