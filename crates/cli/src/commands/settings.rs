// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tool settings commands

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use deck_core::{KnownField, PermissionKind};
use deck_engine::{current_binary, discover_installations, select_binary, SettingsSession};
use deck_storage::STARTUP_INTRO_KEY;
use std::path::PathBuf;

use crate::color;
use crate::context;
use crate::exit_error::ExitError;
use crate::output::{print_json, OutputFormat};
use crate::table::{Column, Table};

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Subcommand)]
pub enum SettingsCommand {
    /// Print the settings document
    Show {},
    /// Edit permission allow rules
    Allow {
        #[command(subcommand)]
        command: RuleCommand,
    },
    /// Edit permission deny rules
    Deny {
        #[command(subcommand)]
        command: RuleCommand,
    },
    /// Edit environment variables passed to the tool
    Env {
        #[command(subcommand)]
        command: EnvCommand,
    },
    /// Set a known scalar field; omit VALUE to remove an optional field
    Set {
        field: FieldName,
        value: Option<String>,
    },
    /// Choose which tool binary to run
    Binary {
        #[command(subcommand)]
        command: BinaryCommand,
    },
    /// Show or toggle the getting-started hint
    Intro { state: Option<Toggle> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Subcommand)]
pub enum RuleCommand {
    /// Append a rule
    Add { rule: String },
    /// Remove every rule equal to RULE
    Remove { rule: String },
}

#[derive(Subcommand)]
pub enum EnvCommand {
    /// Set KEY to VALUE
    Set { key: String, value: String },
    /// Remove KEY
    Unset { key: String },
}

#[derive(Subcommand)]
pub enum BinaryCommand {
    /// List installations found on this machine
    List {},
    /// Use the binary at PATH
    Set { path: PathBuf },
    /// Print the selected binary
    Show {},
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FieldName {
    ApiKeyHelper,
    IncludeCoAuthoredBy,
    Verbose,
    CleanupPeriodDays,
}

impl FieldName {
    /// Typed field for `value`; `None` removes optional fields.
    pub fn parse(self, value: Option<&str>) -> Result<KnownField, ExitError> {
        let flag = |v: Option<&str>| match v {
            Some("true") => Ok(true),
            Some("false") => Ok(false),
            other => Err(ExitError::invalid(format!(
                "expected true or false, got '{}'",
                other.unwrap_or_default()
            ))),
        };
        Ok(match self {
            FieldName::ApiKeyHelper => KnownField::ApiKeyHelper(value.map(str::to_string)),
            FieldName::IncludeCoAuthoredBy => KnownField::IncludeCoAuthoredBy(flag(value)?),
            FieldName::Verbose => KnownField::Verbose(flag(value)?),
            FieldName::CleanupPeriodDays => KnownField::CleanupPeriodDays(
                value
                    .map(|v| {
                        v.parse::<u32>().map_err(|_| {
                            ExitError::invalid(format!("expected a day count, got '{v}'"))
                        })
                    })
                    .transpose()?,
            ),
        })
    }
}

pub async fn handle(command: SettingsCommand, format: OutputFormat) -> Result<()> {
    let prefs = context::preferences()?;
    match command {
        SettingsCommand::Binary { command } => return handle_binary(command, &prefs, format),
        SettingsCommand::Intro { state } => return handle_intro(state, &prefs, format),
        SettingsCommand::Show {} => {
            let session = SettingsSession::load(context::settings_file()?, prefs.clone())?;
            let document = session.document().to_value();
            match format {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "settings": document,
                    "binary_path": session.binary_path(),
                }))?,
                OutputFormat::Text => {
                    println!("{}", serde_json::to_string_pretty(&document)?);
                    let binary = session.binary_path().unwrap_or_else(|| "(not set)".into());
                    println!("{} {}", color::context("binary:"), color::literal(&binary));
                }
            }
            return Ok(());
        }
        _ => {}
    }

    let mut session = SettingsSession::load(context::settings_file()?, prefs)?;
    let summary = match command {
        SettingsCommand::Allow { command } => {
            edit_rules(&mut session, PermissionKind::Allow, command)?
        }
        SettingsCommand::Deny { command } => {
            edit_rules(&mut session, PermissionKind::Deny, command)?
        }
        SettingsCommand::Env { command } => edit_env(&mut session, command)?,
        SettingsCommand::Set { field, value } => {
            session.set(field.parse(value.as_deref())?);
            format!("{field:?} updated")
        }
        SettingsCommand::Binary { .. }
        | SettingsCommand::Intro { .. }
        | SettingsCommand::Show {} => return Ok(()),
    };
    session.save()?;

    match format {
        OutputFormat::Json => print_json(&session.document().to_value())?,
        OutputFormat::Text => println!("{summary}"),
    }
    Ok(())
}

fn edit_rules(
    session: &mut SettingsSession,
    kind: PermissionKind,
    command: RuleCommand,
) -> Result<String> {
    let rules = session.permissions_mut();
    match command {
        RuleCommand::Add { rule } => {
            rules.add(kind, rule.as_str());
            Ok(format!("Added {kind} rule {}", color::literal(&rule)))
        }
        RuleCommand::Remove { rule } => {
            let ids: Vec<_> =
                rules.rules(kind).iter().filter(|r| r.value == rule).map(|r| r.local_id).collect();
            if ids.is_empty() {
                return Err(ExitError::not_found(format!("no {kind} rule '{rule}'")).into());
            }
            for id in ids {
                rules.remove(id);
            }
            Ok(format!("Removed {kind} rule {}", color::literal(&rule)))
        }
    }
}

fn edit_env(session: &mut SettingsSession, command: EnvCommand) -> Result<String> {
    let env = session.env_mut();
    match command {
        EnvCommand::Set { key, value } => {
            let existing = env.entries().iter().rev().find(|e| e.key == key).map(|e| e.local_id);
            match existing {
                Some(id) => {
                    env.set_value(id, value.as_str());
                }
                None => {
                    env.add(key.as_str(), value.as_str());
                }
            }
            Ok(format!("Set {}", color::literal(&key)))
        }
        EnvCommand::Unset { key } => {
            let ids: Vec<_> =
                env.entries().iter().filter(|e| e.key == key).map(|e| e.local_id).collect();
            if ids.is_empty() {
                return Err(ExitError::not_found(format!("no env var '{key}'")).into());
            }
            for id in ids {
                env.remove(id);
            }
            Ok(format!("Unset {}", color::literal(&key)))
        }
    }
}

fn handle_intro(
    state: Option<Toggle>,
    prefs: &deck_storage::Preferences,
    format: OutputFormat,
) -> Result<()> {
    if let Some(state) = state {
        prefs.set(STARTUP_INTRO_KEY, (state == Toggle::On).to_string())?;
    }
    let enabled = prefs.get_bool(STARTUP_INTRO_KEY, true);
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({ "intro": enabled }))?,
        OutputFormat::Text => println!("intro: {}", if enabled { "on" } else { "off" }),
    }
    Ok(())
}

fn handle_binary(
    command: BinaryCommand,
    prefs: &deck_storage::Preferences,
    format: OutputFormat,
) -> Result<()> {
    match command {
        BinaryCommand::List {} => {
            let found = discover_installations();
            let selected = current_binary(prefs);
            match format {
                OutputFormat::Json => {
                    let rows: Vec<_> = found
                        .iter()
                        .map(|i| {
                            serde_json::json!({
                                "path": i.path,
                                "source": i.source.to_string(),
                                "selected": selected.as_ref() == Some(&i.path),
                            })
                        })
                        .collect();
                    print_json(&rows)?;
                }
                OutputFormat::Text if found.is_empty() => println!("No installations found"),
                OutputFormat::Text => {
                    let mut table = Table::new(vec![
                        Column::new(""),
                        Column::painted("PATH", color::literal),
                        Column::new("SOURCE"),
                    ]);
                    for install in &found {
                        let mark = if selected.as_ref() == Some(&install.path) { "*" } else { "" };
                        table.row(vec![
                            mark.to_string(),
                            install.path.display().to_string(),
                            install.source.to_string(),
                        ]);
                    }
                    print!("{}", table.render());
                }
            }
        }
        BinaryCommand::Set { path } => {
            select_binary(prefs, &path).map_err(|e| ExitError::invalid(e.to_string()))?;
            match format {
                OutputFormat::Json => print_json(&serde_json::json!({ "binary_path": path }))?,
                OutputFormat::Text => {
                    println!("Using {}", color::literal(&path.display().to_string()))
                }
            }
        }
        BinaryCommand::Show {} => {
            let selected = current_binary(prefs);
            match format {
                OutputFormat::Json => print_json(&serde_json::json!({ "binary_path": selected }))?,
                OutputFormat::Text => match selected {
                    Some(path) => println!("{}", path.display()),
                    None => println!("(not set)"),
                },
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
