// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! deck-core: domain types for the deck agent manager

pub mod macros;

pub mod agent;
pub mod clock;
pub mod id;
pub mod run;
pub mod settings;
pub mod time_fmt;

pub use agent::{Agent, AgentDefinition, AgentDraft, AgentError, AgentId};
pub use clock::{Clock, FakeClock, SystemClock};
pub use id::short;
pub use run::{RunId, RunMetrics, RunRecord, RunStatus};
pub use settings::{
    EnvironmentEntry, EnvironmentMap, KnownField, LocalId, PermissionKind, PermissionRule,
    PermissionRuleSet, SettingsDocument,
};
pub use time_fmt::{format_elapsed, format_elapsed_ms, format_tokens};
