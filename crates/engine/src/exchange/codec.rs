// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exchange document encoding.
//!
//! ```json
//! { "version": 1, "exported_at": "2026-01-01T00:00:00Z",
//!   "name": "Reviewer", "definition": { ... } }
//! ```
//!
//! Older exports nest everything under `agent`, with the definition fields
//! beside `name`. Both layouts import; only the flat one is written.

use super::catalog::{CatalogEntry, CatalogSource};
use super::files::FileAccess;
use super::ExchangeError;
use chrono::{DateTime, SecondsFormat, Utc};
use deck_core::{Agent, AgentDefinition, AgentDraft, Clock, SystemClock};
use deck_storage::AgentStore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// The only document version this build reads and writes.
pub const EXCHANGE_VERSION: u64 = 1;

const DOCUMENT_SUFFIX: &str = ".agent.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeDocument {
    pub version: u64,
    pub exported_at: String,
    pub name: String,
    pub definition: AgentDefinition,
}

/// Encode `agent` stamped with the current time. The store id is never
/// included.
pub fn export(agent: &Agent) -> Result<Vec<u8>, ExchangeError> {
    export_at(agent, &SystemClock)
}

pub fn export_at(agent: &Agent, clock: &impl Clock) -> Result<Vec<u8>, ExchangeError> {
    let now = i64::try_from(clock.epoch_ms())
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .unwrap_or_default();
    let doc = ExchangeDocument {
        version: EXCHANGE_VERSION,
        exported_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        name: agent.name.clone(),
        definition: agent.definition.clone(),
    };
    serde_json::to_vec_pretty(&doc).map_err(|e| ExchangeError::InvalidFormat(e.to_string()))
}

/// Decode an exchange document into agent contents.
pub fn parse(bytes: &[u8]) -> Result<AgentDraft, ExchangeError> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| ExchangeError::InvalidFormat(format!("not JSON: {e}")))?;
    let Value::Object(mut root) = value else {
        return Err(invalid("top level is not an object"));
    };

    let version = match root.get("version") {
        None => return Err(invalid("missing version")),
        Some(v) => v.as_u64().ok_or_else(|| invalid("version is not an integer"))?,
    };
    if version != EXCHANGE_VERSION {
        return Err(ExchangeError::InvalidFormat(format!("unsupported version {version}")));
    }

    if let Some(nested) = root.remove("agent") {
        return parse_legacy(nested);
    }

    let name = take_name(&mut root)?;
    let definition = match root.remove("definition") {
        Some(Value::Object(map)) => AgentDefinition::from(map),
        Some(_) => return Err(invalid("definition is not an object")),
        None => return Err(invalid("missing definition")),
    };
    Ok(AgentDraft::new(name, definition))
}

fn parse_legacy(nested: Value) -> Result<AgentDraft, ExchangeError> {
    let Value::Object(mut agent) = nested else {
        return Err(invalid("agent is not an object"));
    };
    let name = take_name(&mut agent)?;
    Ok(AgentDraft::new(name, AgentDefinition::from(agent)))
}

fn take_name(map: &mut Map<String, Value>) -> Result<String, ExchangeError> {
    match map.remove("name") {
        Some(Value::String(name)) if name.trim().is_empty() => Err(invalid("missing name")),
        Some(Value::String(name)) => Ok(name),
        Some(_) => Err(invalid("name is not a string")),
        None => Err(invalid("missing name")),
    }
}

fn invalid(reason: &str) -> ExchangeError {
    ExchangeError::InvalidFormat(reason.to_string())
}

/// Parse `bytes` and store the result as a new agent.
///
/// Importing the same document twice creates two agents.
pub fn import_from_document(store: &dyn AgentStore, bytes: &[u8]) -> Result<Agent, ExchangeError> {
    let draft = parse(bytes)?;
    let agent = store.create(draft)?;
    tracing::info!(name = %agent.name, "agent imported");
    Ok(agent)
}

pub fn import_from_file(
    store: &dyn AgentStore,
    files: &dyn FileAccess,
    path: &Path,
) -> Result<Agent, ExchangeError> {
    let bytes = files
        .read_file(path)
        .map_err(|source| ExchangeError::Io { path: path.to_path_buf(), source })?;
    import_from_document(store, &bytes)
}

pub fn export_to_file(
    files: &dyn FileAccess,
    path: &Path,
    agent: &Agent,
) -> Result<(), ExchangeError> {
    let bytes = export(agent)?;
    files
        .write_file(path, &bytes)
        .map_err(|source| ExchangeError::Io { path: path.to_path_buf(), source })?;
    tracing::info!(name = %agent.name, path = %path.display(), "agent exported");
    Ok(())
}

/// Fetch a catalog entry and import it.
///
/// Transport failures are `ImportFailed`; bad content is `InvalidFormat`.
pub async fn import_from_catalog_entry(
    store: &dyn AgentStore,
    catalog: &dyn CatalogSource,
    entry: &CatalogEntry,
) -> Result<Agent, ExchangeError> {
    let bytes = catalog.fetch_entry(entry).await.map_err(ExchangeError::ImportFailed)?;
    import_from_document(store, &bytes)
}

/// Suggested file name for exporting an agent called `name`.
pub fn export_file_name(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.trim().chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        for lower in c.to_lowercase() {
            let kept = lower.is_ascii_lowercase()
                || lower.is_ascii_digit()
                || matches!(lower, '.' | '_' | '-');
            if kept {
                slug.push(lower);
            }
        }
    }
    if slug.is_empty() {
        slug.push_str("agent");
    }
    slug.push_str(DOCUMENT_SUFFIX);
    slug
}

#[cfg(test)]
#[path = "codec_tests.rs"]
mod tests;
