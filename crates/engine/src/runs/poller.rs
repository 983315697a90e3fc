// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background run polling.
//!
//! Fetches from the run source on a fixed interval and folds each batch into
//! the registry. A failed fetch is logged and the cycle is skipped; the cache
//! keeps its last known state and the loop carries on until cancelled.

use super::registry::{ChangeSet, RunRegistry};
use super::source::RunSource;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const CHANGE_CHANNEL_CAPACITY: usize = 64;

pub struct RunPoller {
    changes: broadcast::Sender<ChangeSet>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl RunPoller {
    /// Spawn the poll loop. The first fetch happens immediately.
    pub fn spawn(
        registry: RunRegistry,
        source: Arc<dyn RunSource>,
        interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        let tx = changes.clone();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            tracing::info!(interval_ms = interval.as_millis() as u64, "run poller started");

            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => {}
                }
                // Cancellation also interrupts an in-flight fetch.
                let fetched = tokio::select! {
                    _ = token.cancelled() => break,
                    fetched = source.fetch_runs() => fetched,
                };
                match fetched {
                    Ok(batch) => {
                        let changeset = registry.reconcile(batch);
                        if !changeset.is_empty() {
                            // No subscribers is fine.
                            let _ = tx.send(changeset);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "run fetch failed, keeping cached runs");
                    }
                }
            }
            tracing::info!("run poller stopped");
        });

        Self { changes, cancel, handle }
    }

    /// Receive a `ChangeSet` after every poll that added or updated runs.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeSet> {
        self.changes.subscribe()
    }

    /// Cancel the loop and wait for it to exit.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.handle.await {
            tracing::warn!(error = %e, "run poller task ended abnormally");
        }
    }
}

#[cfg(test)]
#[path = "poller_tests.rs"]
mod tests;
