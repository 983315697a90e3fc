// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::Args;
use deck_core::AgentDefinition;
use serde_json::Value;

use crate::exit_error::ExitError;

/// Definition fields settable from the command line.
#[derive(Args, Debug, Default)]
pub struct DefinitionEdits {
    /// Model alias (e.g. sonnet, opus)
    #[arg(long)]
    pub model: Option<String>,
    /// System prompt
    #[arg(long)]
    pub prompt: Option<String>,
    /// Default task sent when the agent runs
    #[arg(long)]
    pub task: Option<String>,
    /// Icon name
    #[arg(long)]
    pub icon: Option<String>,
    /// Set any definition field; VALUE is parsed as JSON, else taken as text
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,
    /// Remove a definition field
    #[arg(long = "unset", value_name = "KEY")]
    pub unset: Vec<String>,
}

impl DefinitionEdits {
    pub fn apply(&self, definition: &mut AgentDefinition) -> Result<(), ExitError> {
        let named = [
            ("model", &self.model),
            ("system_prompt", &self.prompt),
            ("default_task", &self.task),
            ("icon", &self.icon),
        ];
        for (key, value) in named {
            if let Some(value) = value {
                definition.insert(key, value.as_str());
            }
        }
        for pair in &self.set {
            let (key, value) = parse_assignment(pair)?;
            definition.insert(key, value);
        }
        for key in &self.unset {
            definition.remove(key);
        }
        Ok(())
    }
}

/// `KEY=VALUE` where VALUE is JSON when it parses as JSON.
pub fn parse_assignment(pair: &str) -> Result<(String, Value), ExitError> {
    let Some((key, raw)) = pair.split_once('=') else {
        return Err(ExitError::invalid(format!("expected KEY=VALUE, got '{pair}'")));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err(ExitError::invalid(format!("empty key in '{pair}'")));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), value))
}

#[cfg(test)]
#[path = "fields_tests.rs"]
mod tests;
