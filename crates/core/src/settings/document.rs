// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Settings document with typed known fields and a passthrough remainder.
//!
//! A key is lifted into its typed slot only when its value has exactly the
//! expected JSON shape. Anything else (unknown keys, known keys with the
//! wrong type, `null` where a string is expected) stays in the residual map
//! and is written back untouched unless a setter targets that key.

use super::PermissionKind;
use indexmap::IndexMap;
use serde_json::{Map, Value};

const PERMISSIONS: &str = "permissions";
const ALLOW: &str = "allow";
const DENY: &str = "deny";
const ENV: &str = "env";
const API_KEY_HELPER: &str = "apiKeyHelper";
const INCLUDE_CO_AUTHORED_BY: &str = "includeCoAuthoredBy";
const VERBOSE: &str = "verbose";
const CLEANUP_PERIOD_DAYS: &str = "cleanupPeriodDays";

/// Scalar fields settable through [`SettingsDocument::set`].
///
/// `None` on an optional field removes the key from the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnownField {
    ApiKeyHelper(Option<String>),
    IncludeCoAuthoredBy(bool),
    Verbose(bool),
    CleanupPeriodDays(Option<u32>),
}

impl KnownField {
    fn key(&self) -> &'static str {
        match self {
            KnownField::ApiKeyHelper(_) => API_KEY_HELPER,
            KnownField::IncludeCoAuthoredBy(_) => INCLUDE_CO_AUTHORED_BY,
            KnownField::Verbose(_) => VERBOSE,
            KnownField::CleanupPeriodDays(_) => CLEANUP_PERIOD_DAYS,
        }
    }
}

/// `permissions` object: the two rule lists plus any sibling keys.
#[derive(Debug, Clone, Default, PartialEq)]
struct Permissions {
    allow: Option<Vec<String>>,
    deny: Option<Vec<String>>,
    extra: Map<String, Value>,
}

impl Permissions {
    /// A list left in `extra` because some element is not a string.
    fn raw_list(&self, key: &str) -> Option<&Vec<Value>> {
        self.extra.get(key).and_then(Value::as_array)
    }

    /// Store `rules` under `key`. Elements with no text form are appended
    /// after the rules, which keeps the list in `extra`.
    fn set_list(&mut self, key: &str, rules: Vec<String>, kept: Vec<Value>) {
        let slot = match key {
            ALLOW => &mut self.allow,
            _ => &mut self.deny,
        };
        if kept.is_empty() {
            *slot = Some(rules);
            return;
        }
        *slot = None;
        let items = rules.into_iter().map(Value::String).chain(kept).collect();
        self.extra.insert(key.to_string(), Value::Array(items));
    }

    fn from_object(object: &Map<String, Value>) -> Self {
        let mut permissions = Permissions::default();
        for (key, value) in object {
            match key.as_str() {
                ALLOW if string_list(value).is_some() => permissions.allow = string_list(value),
                DENY if string_list(value).is_some() => permissions.deny = string_list(value),
                _ => {
                    permissions.extra.insert(key.clone(), value.clone());
                }
            }
        }
        permissions
    }

    fn to_value(&self) -> Value {
        let mut object = Map::new();
        if let Some(allow) = &self.allow {
            object.insert(ALLOW.to_string(), string_list_value(allow));
        }
        if let Some(deny) = &self.deny {
            object.insert(DENY.to_string(), string_list_value(deny));
        }
        for (key, value) in &self.extra {
            object.insert(key.clone(), value.clone());
        }
        Value::Object(object)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsDocument {
    permissions: Option<Permissions>,
    env: Option<IndexMap<String, String>>,
    api_key_helper: Option<String>,
    include_co_authored_by: Option<bool>,
    verbose: Option<bool>,
    cleanup_period_days: Option<u32>,
    residual: Map<String, Value>,
}

impl SettingsDocument {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse raw settings text.
    ///
    /// Never fails: empty input, malformed JSON, or a non-object top level
    /// all produce an empty document so the editor always has something to
    /// work with.
    pub fn load(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::empty();
        }
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::from_value(value),
            Err(e) => {
                tracing::warn!(error = %e, "settings are not valid JSON, starting from empty");
                Self::empty()
            }
        }
    }

    pub fn from_value(value: Value) -> Self {
        let Value::Object(object) = value else {
            tracing::warn!("settings top level is not an object, starting from empty");
            return Self::empty();
        };

        let mut doc = Self::empty();
        for (key, value) in object {
            match key.as_str() {
                PERMISSIONS => {
                    if let Some(object) = value.as_object() {
                        doc.permissions = Some(Permissions::from_object(object));
                        continue;
                    }
                }
                ENV => {
                    if let Some(env) = string_map(&value) {
                        doc.env = Some(env);
                        continue;
                    }
                }
                API_KEY_HELPER => {
                    if let Some(helper) = value.as_str() {
                        doc.api_key_helper = Some(helper.to_string());
                        continue;
                    }
                }
                INCLUDE_CO_AUTHORED_BY => {
                    if let Some(b) = value.as_bool() {
                        doc.include_co_authored_by = Some(b);
                        continue;
                    }
                }
                VERBOSE => {
                    if let Some(b) = value.as_bool() {
                        doc.verbose = Some(b);
                        continue;
                    }
                }
                CLEANUP_PERIOD_DAYS => {
                    if let Some(days) = value.as_u64().and_then(|n| u32::try_from(n).ok()) {
                        doc.cleanup_period_days = Some(days);
                        continue;
                    }
                }
                _ => {}
            }
            doc.residual.insert(key, value);
        }
        doc
    }

    /// Replace exactly `permissions.allow` and `permissions.deny`.
    ///
    /// Other keys under `permissions` are kept, and so are list elements
    /// that [`Self::rule_rows`] could not offer for editing.
    pub fn with_permissions(mut self, allow: Vec<String>, deny: Vec<String>) -> Self {
        let kept_allow = self.unconvertible_rules(ALLOW);
        let kept_deny = self.unconvertible_rules(DENY);
        self.drop_residual(PERMISSIONS);
        let permissions = self.permissions.get_or_insert_with(Permissions::default);
        permissions.extra.retain(|k, _| k != ALLOW && k != DENY);
        permissions.set_list(ALLOW, allow, kept_allow);
        permissions.set_list(DENY, deny, kept_deny);
        self
    }

    /// Replace exactly the `env` field.
    ///
    /// Entries that [`Self::env_rows`] could not offer for editing are kept
    /// unless `env` sets the same key.
    pub fn with_env(mut self, env: IndexMap<String, String>) -> Self {
        let kept: Vec<(String, Value)> = self
            .residual
            .get(ENV)
            .and_then(Value::as_object)
            .into_iter()
            .flatten()
            .filter(|(k, v)| scalar_text(v).is_none() && !env.contains_key(*k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        self.drop_residual(ENV);
        if kept.is_empty() {
            self.env = Some(env);
            return self;
        }
        let mut object: Map<String, Value> =
            env.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
        object.extend(kept);
        self.env = None;
        self.residual.insert(ENV.to_string(), Value::Object(object));
        self
    }

    pub fn set(&mut self, field: KnownField) {
        self.drop_residual(field.key());
        match field {
            KnownField::ApiKeyHelper(v) => self.api_key_helper = v,
            KnownField::IncludeCoAuthoredBy(v) => self.include_co_authored_by = Some(v),
            KnownField::Verbose(v) => self.verbose = Some(v),
            KnownField::CleanupPeriodDays(v) => self.cleanup_period_days = v,
        }
    }

    /// Set an unrecognized top-level field.
    ///
    /// Known keys are routed through [`Self::from_value`] rules so the typed
    /// slot and the residual never both hold the same key.
    pub fn set_extra(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        let mut single = Map::new();
        single.insert(key.clone(), value.clone());
        let parsed = Self::from_value(Value::Object(single));
        self.clear_known(&key);
        if parsed.residual.is_empty() {
            self.merge_known(parsed);
        } else {
            self.residual.insert(key, value);
        }
    }

    pub fn remove_extra(&mut self, key: &str) -> Option<Value> {
        let found = self.residual.get(key).cloned();
        self.drop_residual(key);
        found
    }

    pub fn allow(&self) -> &[String] {
        self.permissions.as_ref().and_then(|p| p.allow.as_deref()).unwrap_or_default()
    }

    pub fn deny(&self) -> &[String] {
        self.permissions.as_ref().and_then(|p| p.deny.as_deref()).unwrap_or_default()
    }

    pub fn env(&self) -> Option<&IndexMap<String, String>> {
        self.env.as_ref()
    }

    /// Rows a rule editor starts from.
    ///
    /// A list holding non-strings is read too: numbers and booleans become
    /// their text, and elements with no text form are left out.
    pub fn rule_rows(&self, kind: PermissionKind) -> Vec<String> {
        let key = match kind {
            PermissionKind::Allow => ALLOW,
            PermissionKind::Deny => DENY,
        };
        let Some(permissions) = &self.permissions else {
            return Vec::new();
        };
        let typed = match kind {
            PermissionKind::Allow => &permissions.allow,
            PermissionKind::Deny => &permissions.deny,
        };
        match typed {
            Some(rules) => rules.clone(),
            None => permissions
                .raw_list(key)
                .into_iter()
                .flatten()
                .filter_map(scalar_text)
                .collect(),
        }
    }

    /// Rows an env editor starts from, with the same leniency as
    /// [`Self::rule_rows`].
    pub fn env_rows(&self) -> Vec<(String, String)> {
        if let Some(env) = &self.env {
            return env.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        }
        self.residual
            .get(ENV)
            .and_then(Value::as_object)
            .into_iter()
            .flatten()
            .filter_map(|(k, v)| scalar_text(v).map(|text| (k.clone(), text)))
            .collect()
    }

    pub fn api_key_helper(&self) -> Option<&str> {
        self.api_key_helper.as_deref()
    }

    pub fn include_co_authored_by(&self) -> Option<bool> {
        self.include_co_authored_by
    }

    pub fn verbose(&self) -> Option<bool> {
        self.verbose
    }

    pub fn cleanup_period_days(&self) -> Option<u32> {
        self.cleanup_period_days
    }

    /// Unrecognized (or mistyped) fields carried through untouched.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.residual
    }

    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        if let Some(permissions) = &self.permissions {
            object.insert(PERMISSIONS.to_string(), permissions.to_value());
        }
        if let Some(env) = &self.env {
            let env: Map<String, Value> =
                env.iter().map(|(k, v)| (k.clone(), Value::String(v.clone()))).collect();
            object.insert(ENV.to_string(), Value::Object(env));
        }
        if let Some(helper) = &self.api_key_helper {
            object.insert(API_KEY_HELPER.to_string(), Value::String(helper.clone()));
        }
        if let Some(b) = self.include_co_authored_by {
            object.insert(INCLUDE_CO_AUTHORED_BY.to_string(), Value::Bool(b));
        }
        if let Some(b) = self.verbose {
            object.insert(VERBOSE.to_string(), Value::Bool(b));
        }
        if let Some(days) = self.cleanup_period_days {
            object.insert(CLEANUP_PERIOD_DAYS.to_string(), Value::from(days));
        }
        for (key, value) in &self.residual {
            object.insert(key.clone(), value.clone());
        }
        Value::Object(object)
    }

    /// Pretty-printed JSON, the form written back to disk.
    pub fn serialize(&self) -> String {
        // Serializing a `Value` built from maps and scalars cannot fail.
        serde_json::to_string_pretty(&self.to_value()).unwrap_or_else(|_| "{}".to_string())
    }

    fn unconvertible_rules(&self, key: &str) -> Vec<Value> {
        self.permissions
            .as_ref()
            .and_then(|p| p.raw_list(key))
            .into_iter()
            .flatten()
            .filter(|v| scalar_text(v).is_none())
            .cloned()
            .collect()
    }

    fn drop_residual(&mut self, key: &str) {
        self.residual.retain(|k, _| k != key);
    }

    fn clear_known(&mut self, key: &str) {
        match key {
            PERMISSIONS => self.permissions = None,
            ENV => self.env = None,
            API_KEY_HELPER => self.api_key_helper = None,
            INCLUDE_CO_AUTHORED_BY => self.include_co_authored_by = None,
            VERBOSE => self.verbose = None,
            CLEANUP_PERIOD_DAYS => self.cleanup_period_days = None,
            _ => {}
        }
        self.drop_residual(key);
    }

    fn merge_known(&mut self, other: SettingsDocument) {
        if other.permissions.is_some() {
            self.permissions = other.permissions;
        }
        if other.env.is_some() {
            self.env = other.env;
        }
        if other.api_key_helper.is_some() {
            self.api_key_helper = other.api_key_helper;
        }
        if other.include_co_authored_by.is_some() {
            self.include_co_authored_by = other.include_co_authored_by;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.cleanup_period_days.is_some() {
            self.cleanup_period_days = other.cleanup_period_days;
        }
    }
}

/// Editor text for a scalar. `None` for null, arrays, and objects.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value.as_array()?.iter().map(|v| v.as_str().map(str::to_string)).collect()
}

fn string_list_value(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}

fn string_map(value: &Value) -> Option<IndexMap<String, String>> {
    value
        .as_object()?
        .iter()
        .map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
        .collect()
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
