// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use anyhow::Result;
use clap::Subcommand;
use deck_engine::exchange::{self, CatalogSource, HttpCatalog};
use deck_storage::AgentStore;

use crate::color;
use crate::exit_error::{ExitError, EXIT_FAILURE};
use crate::output::{print_json, OutputFormat};
use crate::table::{Column, Table};

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List agents available in the shared catalog
    List {},
    /// Import an agent from the shared catalog
    Import {
        /// Entry name, with or without the .agent.json suffix
        name: String,
    },
}

pub async fn handle(
    command: CatalogCommand,
    store: &dyn AgentStore,
    format: OutputFormat,
) -> Result<()> {
    let catalog = HttpCatalog::from_env()?;
    let entries = catalog
        .list_entries()
        .await
        .map_err(|e| ExitError::new(EXIT_FAILURE, format!("catalog unavailable: {e}")))?;

    match command {
        CatalogCommand::List {} => match format {
            OutputFormat::Json => print_json(&entries)?,
            OutputFormat::Text => {
                let mut table = Table::new(vec![
                    Column::painted("NAME", color::header),
                    Column::new("SIZE"),
                    Column::new("FILE"),
                ]);
                for entry in &entries {
                    table.row(vec![
                        entry.display_name().to_string(),
                        entry.size.to_string(),
                        entry.name.clone(),
                    ]);
                }
                print!("{}", table.render());
            }
        },
        CatalogCommand::Import { name } => {
            let found = entries.iter().find(|e| e.name == name || e.display_name() == name);
            let Some(entry) = found else {
                return Err(ExitError::not_found(format!("no catalog entry named '{name}'")).into());
            };
            let agent = exchange::import_from_catalog_entry(store, &catalog, entry)
                .await
                .map_err(ExitError::from)?;
            match format {
                OutputFormat::Json => print_json(&agent)?,
                OutputFormat::Text => {
                    println!("Imported agent '{}' from catalog", color::header(&agent.name))
                }
            }
        }
    }
    Ok(())
}
