// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Portable agent documents: export, import, and the shared catalog.

mod catalog;
mod codec;
mod files;

pub use catalog::{CatalogEntry, CatalogError, CatalogSource, HttpCatalog};
pub use codec::{
    export, export_at, export_file_name, export_to_file, import_from_catalog_entry,
    import_from_document, import_from_file, parse, ExchangeDocument, EXCHANGE_VERSION,
};
pub use files::{FileAccess, LocalFiles};

use deck_storage::StoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("invalid agent document: {0}")]
    InvalidFormat(String),
    #[error("failed to fetch agent: {0}")]
    ImportFailed(#[source] CatalogError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
