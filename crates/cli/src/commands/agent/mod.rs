// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent management commands

mod catalog;
mod fields;

use anyhow::Result;
use clap::{Args, Subcommand};
use deck_core::{AgentDefinition, AgentDraft, SystemClock};
use deck_engine::exchange::{self, LocalFiles};
use deck_storage::{AgentStore, STARTUP_INTRO_KEY};
use std::path::PathBuf;

use crate::color;
use crate::commands::resolve::resolve_agent;
use crate::context;
use crate::exit_error::ExitError;
use crate::output::{agents_table, print_json, runs_table, OutputFormat};

pub use catalog::CatalogCommand;
use fields::DefinitionEdits;

#[derive(Args)]
pub struct AgentArgs {
    #[command(subcommand)]
    pub command: AgentCommand,
}

#[derive(Subcommand)]
pub enum AgentCommand {
    /// List saved agents
    List {},
    /// Show an agent's full definition
    Show {
        /// Agent ID, name, or ID prefix
        agent: String,
    },
    /// Create a new agent
    Create {
        /// Display name
        name: String,
        #[command(flatten)]
        edits: DefinitionEdits,
    },
    /// Replace fields of an existing agent
    Update {
        /// Agent ID, name, or ID prefix
        agent: String,
        /// New display name
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        edits: DefinitionEdits,
    },
    /// Delete an agent (its run history is kept)
    Delete {
        /// Agent ID, name, or ID prefix
        agent: String,
    },
    /// Write an agent to a portable document
    Export {
        /// Agent ID, name, or ID prefix
        agent: String,
        /// Output path, or `-` for stdout (default: <name>.agent.json)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Create an agent from a portable document
    Import {
        /// Path to an exported agent document
        path: PathBuf,
    },
    /// Browse and import shared agents
    Catalog {
        #[command(subcommand)]
        command: CatalogCommand,
    },
}

pub async fn handle(command: AgentCommand, format: OutputFormat) -> Result<()> {
    let store = context::agent_store()?;
    match command {
        AgentCommand::List {} => {
            let agents = store.list();
            match format {
                OutputFormat::Json => print_json(&agents)?,
                OutputFormat::Text if agents.is_empty() => {
                    println!("No agents");
                    if context::preferences()?.get_bool(STARTUP_INTRO_KEY, true) {
                        println!(
                            "{}",
                            color::muted(
                                "Create one with `deck agent create <NAME>` \
                                 (hide this hint: `deck settings intro off`)"
                            )
                        );
                    }
                }
                OutputFormat::Text => print!("{}", agents_table(&agents).render()),
            }
        }
        AgentCommand::Show { agent } => {
            let agent = resolve_agent(&agent, &store.list())?;
            match format {
                OutputFormat::Json => print_json(&agent)?,
                OutputFormat::Text => {
                    let id = agent.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
                    println!("{} {}", color::header(&agent.name), color::muted(&id));
                    println!("{}", serde_json::to_string_pretty(&agent.definition)?);
                    if let Ok(runs_path) = deck_engine::env::runs_path() {
                        show_recent_runs(&agent, runs_path).await;
                    }
                }
            }
        }
        AgentCommand::Create { name, edits } => {
            let mut definition = AgentDefinition::new();
            edits.apply(&mut definition)?;
            let agent = store.create(AgentDraft::new(name, definition)).map_err(ExitError::from)?;
            report_saved("Created", &agent, format)?;
        }
        AgentCommand::Update { agent, name, edits } => {
            let current = resolve_agent(&agent, &store.list())?;
            let Some(id) = current.id.clone() else {
                return Err(ExitError::not_found("agent has no id").into());
            };
            let mut draft = current.to_draft();
            if let Some(name) = name {
                draft.name = name;
            }
            edits.apply(&mut draft.definition)?;
            let agent = store.update(&id, draft).map_err(ExitError::from)?;
            report_saved("Updated", &agent, format)?;
        }
        AgentCommand::Delete { agent } => {
            let agent = resolve_agent(&agent, &store.list())?;
            if let Some(id) = &agent.id {
                store.delete(id).map_err(ExitError::from)?;
            }
            match format {
                OutputFormat::Json => print_json(&serde_json::json!({ "deleted": agent.id }))?,
                OutputFormat::Text => println!("Deleted agent '{}'", color::header(&agent.name)),
            }
        }
        AgentCommand::Export { agent, out } => {
            let agent = resolve_agent(&agent, &store.list())?;
            match out {
                Some(path) if path.as_os_str() == "-" => {
                    let bytes = exchange::export(&agent).map_err(ExitError::from)?;
                    println!("{}", String::from_utf8_lossy(&bytes));
                }
                out => {
                    let path = out
                        .unwrap_or_else(|| PathBuf::from(exchange::export_file_name(&agent.name)));
                    exchange::export_to_file(&LocalFiles, &path, &agent).map_err(ExitError::from)?;
                    match format {
                        OutputFormat::Json => print_json(&serde_json::json!({ "path": path }))?,
                        OutputFormat::Text => println!(
                            "Exported '{}' to {}",
                            color::header(&agent.name),
                            color::literal(&path.display().to_string())
                        ),
                    }
                }
            }
        }
        AgentCommand::Import { path } => {
            let agent =
                exchange::import_from_file(&store, &LocalFiles, &path).map_err(ExitError::from)?;
            report_saved("Imported", &agent, format)?;
        }
        AgentCommand::Catalog { command } => catalog::handle(command, &store, format).await?,
    }
    Ok(())
}

fn report_saved(verb: &str, agent: &deck_core::Agent, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(agent)?,
        OutputFormat::Text => {
            let id = agent.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
            println!("{verb} agent '{}' ({})", color::header(&agent.name), color::muted(&id));
        }
    }
    Ok(())
}

async fn show_recent_runs(agent: &deck_core::Agent, runs_path: PathBuf) {
    use deck_engine::runs::{RunRegistry, RunSource};
    let Some(id) = &agent.id else { return };
    let registry = RunRegistry::new();
    match deck_engine::FileRunSource::new(runs_path).fetch_runs().await {
        Ok(batch) => {
            registry.reconcile(batch);
        }
        Err(e) => tracing::warn!(error = %e, "could not read runs"),
    }
    let runs = registry.runs_for_agent(id);
    if !runs.is_empty() {
        println!();
        print!("{}", runs_table(&runs, &SystemClock).render());
    }
}
