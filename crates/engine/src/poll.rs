//! Standardized list refresh.
//!
//! The original front end polled some record types every 30 seconds and
//! others never, hardcoded per page. Here the strategy is the type's
//! [`RefreshPolicy`]: `Manual` types get no task, `Interval` types get one
//! background task that re-lists on schedule and hands each snapshot to a
//! callback. A failed refresh is logged and retried at the next tick;
//! nothing else is affected.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use docket_core::{Record, RefreshPolicy};
use docket_storage::DocumentStore;

use crate::lifecycle::LifecycleEngine;

/// Handle to one type's refresh task. Aborts the task on drop.
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    /// Start the refresh task for a record type, per its refresh policy.
    ///
    /// Returns `None` for `Manual` types. The callback receives each
    /// refreshed snapshot in turn.
    pub fn spawn<S, F>(
        engine: Arc<LifecycleEngine<S>>,
        type_key: &'static str,
        callback: F,
    ) -> Option<Poller>
    where
        S: DocumentStore,
        F: Fn(Vec<Record>) + Send + Sync + 'static,
    {
        let policy = docket_core::find_type(type_key)?.refresh;
        let secs = match policy {
            RefreshPolicy::Manual => return None,
            RefreshPolicy::Interval { secs } => secs,
        };

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(secs));
            // The first tick fires immediately; skip it so the initial
            // load stays with the caller.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                match engine.list(type_key).await {
                    Ok(records) => callback(records),
                    Err(e) => {
                        tracing::warn!(type_key, error = %e, "refresh failed; will retry");
                    }
                }
            }
        });
        Some(Poller { handle })
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
