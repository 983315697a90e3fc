// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error type that carries a process exit code.
//!
//! Handlers return `ExitError` for failures the user should be able to script
//! against; `main()` maps it to the process status.

use std::fmt;

/// Generic failure.
pub const EXIT_FAILURE: i32 = 1;
/// The named agent (or other entity) does not exist or is ambiguous.
pub const EXIT_NOT_FOUND: i32 = 2;
/// Input could not be parsed or validated.
pub const EXIT_INVALID: i32 = 3;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(EXIT_NOT_FOUND, message)
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(EXIT_INVALID, message)
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

impl From<deck_storage::StoreError> for ExitError {
    fn from(e: deck_storage::StoreError) -> Self {
        use deck_storage::StoreError;
        let code = match &e {
            StoreError::NotFound(_) => EXIT_NOT_FOUND,
            StoreError::InvalidAgent(_) => EXIT_INVALID,
            StoreError::PersistenceFailed { .. } | StoreError::Corrupt { .. } => EXIT_FAILURE,
        };
        Self::new(code, e.to_string())
    }
}

impl From<deck_engine::ExchangeError> for ExitError {
    fn from(e: deck_engine::ExchangeError) -> Self {
        use deck_engine::ExchangeError;
        match e {
            ExchangeError::Store(inner) => inner.into(),
            ExchangeError::InvalidFormat(_) => Self::invalid(e.to_string()),
            ExchangeError::ImportFailed(_) | ExchangeError::Io { .. } => {
                Self::new(EXIT_FAILURE, e.to_string())
            }
        }
    }
}

#[cfg(test)]
#[path = "exit_error_tests.rs"]
mod tests;
