// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent lookup for commands that take an agent reference.
//!
//! A reference is an exact id, an exact name, or an unambiguous id prefix
//! (with or without the `agt-` prefix).

use deck_core::Agent;

use crate::exit_error::ExitError;

pub fn resolve_agent(query: &str, agents: &[Agent]) -> Result<Agent, ExitError> {
    let id_of = |a: &Agent| a.id.as_ref().map(|id| id.as_str().to_string()).unwrap_or_default();

    if let Some(agent) = agents.iter().find(|a| id_of(a) == query) {
        return Ok(agent.clone());
    }

    let named: Vec<_> = agents.iter().filter(|a| a.name == query).collect();
    match named.as_slice() {
        [one] => return Ok((*one).clone()),
        [] => {}
        many => return Err(ambiguous(query, many)),
    }

    let prefixed: Vec<_> = agents
        .iter()
        .filter(|a| {
            let id = id_of(a);
            !query.is_empty() && (id.starts_with(query) || id.starts_with(&format!("agt-{query}")))
        })
        .collect();
    match prefixed.as_slice() {
        [one] => Ok((*one).clone()),
        [] => Err(ExitError::not_found(format!("no agent matches '{query}'"))),
        many => Err(ambiguous(query, many)),
    }
}

fn ambiguous(query: &str, matches: &[&Agent]) -> ExitError {
    let listed: Vec<String> = matches
        .iter()
        .map(|a| {
            let id = a.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
            format!("  {id} {}", a.name)
        })
        .collect();
    ExitError::not_found(format!(
        "'{query}' matches {} agents:\n{}",
        matches.len(),
        listed.join("\n")
    ))
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
