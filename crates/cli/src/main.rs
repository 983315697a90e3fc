// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! deck: manage agents, their runs, and the tool's settings

mod color;
mod commands;
mod context;
mod exit_error;
mod output;
mod table;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{agent, run, settings};
use exit_error::{ExitError, EXIT_FAILURE};
use output::OutputFormat;

#[derive(Parser)]
#[command(
    name = "deck",
    version,
    about = "Manage agents, their runs, and tool settings",
    styles = color::styles()
)]
struct Cli {
    /// Output format
    #[arg(long, short = 'o', value_enum, global = true, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Saved agents: create, edit, export, import
    Agent(agent::AgentArgs),
    /// Run history and live progress
    Run(run::RunArgs),
    /// Tool settings: permissions, environment, binary
    Settings(settings::SettingsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DECK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    // Already installed is fine.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Agent(args) => agent::handle(args.command, cli.output).await,
        Command::Run(args) => run::handle(args.command, cli.output).await,
        Command::Settings(args) => settings::handle(args.command, cli.output).await,
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(e) = dispatch(cli).await {
        let code = match e.downcast_ref::<ExitError>() {
            Some(exit) => {
                eprintln!("error: {}", exit.message);
                exit.code
            }
            None => {
                eprintln!("error: {e:#}");
                EXIT_FAILURE
            }
        };
        std::process::exit(code);
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
