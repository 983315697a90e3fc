// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Row editor for `permissions.allow` / `permissions.deny`.

use super::{is_blank, LocalId, LocalIds, SettingsDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionKind {
    Allow,
    Deny,
}

crate::simple_display! {
    PermissionKind {
        Allow => "allow",
        Deny => "deny",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRule {
    pub local_id: LocalId,
    pub value: String,
}

/// Both rule lists for one editing session.
#[derive(Debug, Clone, Default)]
pub struct PermissionRuleSet {
    allow: Vec<PermissionRule>,
    deny: Vec<PermissionRule>,
    ids: LocalIds,
}

impl PermissionRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session from the rules currently in `doc`.
    pub fn from_document(doc: &SettingsDocument) -> Self {
        let mut set = Self::new();
        for kind in [PermissionKind::Allow, PermissionKind::Deny] {
            for rule in doc.rule_rows(kind) {
                set.add(kind, rule);
            }
        }
        set
    }

    pub fn rules(&self, kind: PermissionKind) -> &[PermissionRule] {
        match kind {
            PermissionKind::Allow => &self.allow,
            PermissionKind::Deny => &self.deny,
        }
    }

    /// Append a rule row. Blank values are accepted here and dropped on save.
    pub fn add(&mut self, kind: PermissionKind, value: impl Into<String>) -> LocalId {
        let local_id = self.ids.issue();
        self.list_mut(kind).push(PermissionRule { local_id, value: value.into() });
        local_id
    }

    /// Returns false when no row has `local_id`.
    pub fn update(&mut self, local_id: LocalId, value: impl Into<String>) -> bool {
        match self.find_mut(local_id) {
            Some(rule) => {
                rule.value = value.into();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, local_id: LocalId) -> bool {
        let before = self.allow.len() + self.deny.len();
        self.allow.retain(|r| r.local_id != local_id);
        self.deny.retain(|r| r.local_id != local_id);
        before != self.allow.len() + self.deny.len()
    }

    /// Ordered `(allow, deny)` lists with blank rows dropped.
    pub fn collapse(&self) -> (Vec<String>, Vec<String>) {
        (collapse_list(&self.allow), collapse_list(&self.deny))
    }

    pub fn apply_to(&self, doc: SettingsDocument) -> SettingsDocument {
        let (allow, deny) = self.collapse();
        doc.with_permissions(allow, deny)
    }

    fn list_mut(&mut self, kind: PermissionKind) -> &mut Vec<PermissionRule> {
        match kind {
            PermissionKind::Allow => &mut self.allow,
            PermissionKind::Deny => &mut self.deny,
        }
    }

    fn find_mut(&mut self, local_id: LocalId) -> Option<&mut PermissionRule> {
        self.allow.iter_mut().chain(self.deny.iter_mut()).find(|r| r.local_id == local_id)
    }
}

fn collapse_list(rules: &[PermissionRule]) -> Vec<String> {
    rules.iter().filter(|r| !is_blank(&r.value)).map(|r| r.value.clone()).collect()
}

#[cfg(test)]
#[path = "permissions_tests.rs"]
mod tests;
