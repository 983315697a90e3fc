// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use deck_core::{format_elapsed, format_tokens, Agent, Clock, RunRecord};
use serde::Serialize;

use crate::color;
use crate::table::{Column, Table};

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn agents_table(agents: &[Agent]) -> Table {
    let mut table = Table::new(vec![
        Column::painted("ID", color::muted),
        Column::painted("NAME", color::header),
        Column::new("MODEL"),
    ]);
    for agent in agents {
        table.row(vec![
            agent.id.as_ref().map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
            agent.name.clone(),
            agent.definition.model().unwrap_or("-").to_string(),
        ]);
    }
    table
}

/// One row per run: id, agent, status, elapsed, tokens, cost.
pub fn runs_table(runs: &[RunRecord], clock: &impl Clock) -> Table {
    let mut table = Table::new(vec![
        Column::painted("ID", color::muted),
        Column::new("AGENT"),
        Column::new("STATUS"),
        Column::new("ELAPSED"),
        Column::new("TOKENS"),
        Column::new("COST"),
    ]);
    for run in runs {
        table.row(run_cells(run, clock));
    }
    table
}

pub fn run_cells(run: &RunRecord, clock: &impl Clock) -> Vec<String> {
    let now_ms = clock.epoch_ms();
    let cost = run.metrics.as_ref().and_then(|m| m.cost_usd);
    vec![
        run.id.to_string(),
        run.agent_name.clone(),
        run.status.to_string(),
        run.elapsed_secs(now_ms).map(format_elapsed).unwrap_or_else(|| "-".into()),
        run.total_tokens().map(format_tokens).unwrap_or_else(|| "-".into()),
        cost.map(|c| format!("${c:.4}")).unwrap_or_else(|| "-".into()),
    ]
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
