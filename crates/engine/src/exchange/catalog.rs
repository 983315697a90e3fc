// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote listing of shared agent documents.
//!
//! The listing is a GitHub contents-API style JSON array. Only file entries
//! that look like agent documents are offered for import.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("catalog entry {0} has no download url")]
    NoDownloadUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub sha: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl CatalogEntry {
    /// File entries named like agent documents.
    pub fn is_agent_document(&self) -> bool {
        self.kind == "file" && self.name.ends_with(".json")
    }

    /// Display name without the document suffix.
    pub fn display_name(&self) -> &str {
        self.name
            .strip_suffix(".agent.json")
            .or_else(|| self.name.strip_suffix(".json"))
            .unwrap_or(&self.name)
    }
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn list_entries(&self) -> Result<Vec<CatalogEntry>, CatalogError>;
    async fn fetch_entry(&self, entry: &CatalogEntry) -> Result<Vec<u8>, CatalogError>;
}

/// Catalog served over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    http: Client,
    url: String,
}

impl HttpCatalog {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("deck/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, url: url.into() })
    }

    /// Catalog at `DECK_CATALOG_URL` with `DECK_CATALOG_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, CatalogError> {
        Self::new(crate::env::catalog_url(), crate::env::catalog_timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, CatalogError> {
        let resp = self.http.get(url).header("Accept", "application/json").send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status { url: url.to_string(), status: status.as_u16() });
        }
        Ok(resp)
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    async fn list_entries(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        let entries: Vec<CatalogEntry> = self.get(&self.url).await?.json().await?;
        let total = entries.len();
        let agents: Vec<_> = entries.into_iter().filter(CatalogEntry::is_agent_document).collect();
        tracing::debug!(url = %self.url, total, agents = agents.len(), "listed catalog");
        Ok(agents)
    }

    async fn fetch_entry(&self, entry: &CatalogEntry) -> Result<Vec<u8>, CatalogError> {
        let url = entry
            .download_url
            .as_deref()
            .ok_or_else(|| CatalogError::NoDownloadUrl(entry.name.clone()))?;
        let bytes = self.get(url).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
