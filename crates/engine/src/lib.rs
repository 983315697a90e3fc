// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! deck-engine: run polling, agent exchange, and settings editing

pub mod binary;
pub mod env;
pub mod exchange;
pub mod runs;
mod settings_session;

pub use binary::{
    current_binary, discover_installations, select_binary, BinaryError, InstallSource,
    Installation,
};
pub use exchange::{ExchangeError, HttpCatalog, LocalFiles};
pub use runs::{ChangeSet, FileRunSource, RunPoller, RunRegistry};
pub use settings_session::{SessionError, SettingsSession};
