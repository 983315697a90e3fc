// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run history commands

use anyhow::Result;
use clap::{Args, Subcommand};
use deck_core::{RunRecord, SystemClock};
use deck_engine::runs::{ChangeSet, FileRunSource, RunPoller, RunRegistry, RunSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;

use crate::color;
use crate::commands::resolve::resolve_agent;
use crate::context;
use crate::output::{print_json, run_cells, runs_table, OutputFormat};
use deck_storage::AgentStore;

#[derive(Args)]
pub struct RunArgs {
    #[command(subcommand)]
    pub command: RunCommand,
}

#[derive(Subcommand)]
pub enum RunCommand {
    /// List runs, newest first
    List {
        /// Only runs of this agent (ID, name, or ID prefix)
        #[arg(long)]
        agent: Option<String>,
    },
    /// Follow runs as they progress (Ctrl-C to stop)
    Watch {
        /// Poll interval in milliseconds (default: DECK_POLL_INTERVAL_MS or 3000)
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

pub async fn handle(command: RunCommand, format: OutputFormat) -> Result<()> {
    let source = FileRunSource::new(deck_engine::env::runs_path()?);
    match command {
        RunCommand::List { agent } => {
            let registry = RunRegistry::new();
            registry.reconcile(source.fetch_runs().await?);
            let runs = match agent {
                Some(query) => {
                    let store = context::agent_store()?;
                    let agent = resolve_agent(&query, &store.list())?;
                    match &agent.id {
                        Some(id) => registry.runs_for_agent(id),
                        None => Vec::new(),
                    }
                }
                None => registry.list_with_metrics(),
            };
            print_runs(&runs, format)?;
        }
        RunCommand::Watch { interval_ms } => {
            let interval = interval_ms
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or_else(deck_engine::env::poll_interval);
            watch(Arc::new(source), interval, format).await?;
        }
    }
    Ok(())
}

fn print_runs(runs: &[RunRecord], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(runs)?,
        OutputFormat::Text if runs.is_empty() => println!("No runs"),
        OutputFormat::Text => print!("{}", runs_table(runs, &SystemClock).render()),
    }
    Ok(())
}

async fn watch(source: Arc<dyn RunSource>, interval: Duration, format: OutputFormat) -> Result<()> {
    let registry = RunRegistry::new();
    let cancel = CancellationToken::new();
    let poller = RunPoller::spawn(registry.clone(), source, interval, cancel.clone());
    let mut changes = poller.subscribe();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            received = changes.recv() => match received {
                Ok(changeset) => print_changes(&registry, &changeset, format)?,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "watch fell behind, showing current state");
                    print_runs(&registry.list_with_metrics(), format)?;
                }
                Err(RecvError::Closed) => break,
            },
        }
    }
    cancel.cancel();
    poller.shutdown().await;
    Ok(())
}

fn print_changes(registry: &RunRegistry, changes: &ChangeSet, format: OutputFormat) -> Result<()> {
    let changed = changes
        .added
        .iter()
        .map(|id| ("added", id))
        .chain(changes.updated.iter().map(|id| ("updated", id)));
    for (kind, id) in changed {
        let Some(run) = registry.get(id) else { continue };
        match format {
            OutputFormat::Json => {
                let line = serde_json::json!({ "change": kind, "run": run });
                println!("{}", serde_json::to_string(&line)?)
            }
            OutputFormat::Text => {
                let cells = run_cells(&run, &SystemClock);
                println!(
                    "{} {} {} {} elapsed {} tokens {}",
                    color::muted(&cells[0]),
                    color::header(&cells[1]),
                    color::status(run.status),
                    color::context(kind),
                    cells[3],
                    cells[4],
                );
            }
        }
    }
    Ok(())
}
