// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent definitions.
//!
//! An agent is a reusable, named template for running the external AI tool.
//! Its `definition` is an attribute bag (prompts, model choice, tool
//! permissions, hooks) that this crate never interprets beyond a few typed
//! read accessors; whatever arrives is carried forward unchanged through the
//! store and the exchange format.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

crate::define_id! {
    /// Store-assigned agent identifier. Never exported.
    pub struct AgentId("agt-");
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("agent name must not be empty")]
    EmptyName,
}

/// Opaque execution configuration of an agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentDefinition(Map<String, Value>);

impl AgentDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Model alias (`sonnet`, `opus`, ...), when set as a string.
    pub fn model(&self) -> Option<&str> {
        self.str_field("model")
    }

    pub fn system_prompt(&self) -> Option<&str> {
        self.str_field("system_prompt")
    }

    pub fn default_task(&self) -> Option<&str> {
        self.str_field("default_task")
    }

    pub fn icon(&self) -> Option<&str> {
        self.str_field("icon")
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for AgentDefinition {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Agent contents without an identity: the input to create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDraft {
    pub name: String,
    #[serde(default)]
    pub definition: AgentDefinition,
}

impl AgentDraft {
    pub fn new(name: impl Into<String>, definition: AgentDefinition) -> Self {
        Self { name: name.into(), definition }
    }

    pub fn validate(&self) -> Result<(), AgentError> {
        if self.name.trim().is_empty() {
            return Err(AgentError::EmptyName);
        }
        Ok(())
    }

    pub fn into_agent(self, id: AgentId) -> Agent {
        Agent { id: Some(id), name: self.name, definition: self.definition }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Absent until the store has persisted the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AgentId>,
    pub name: String,
    #[serde(default)]
    pub definition: AgentDefinition,
}

impl Agent {
    /// Contents of this agent, dropping its identity.
    pub fn to_draft(&self) -> AgentDraft {
        AgentDraft { name: self.name.clone(), definition: self.definition.clone() }
    }
}

#[cfg(test)]
#[path = "agent_tests.rs"]
mod tests;
