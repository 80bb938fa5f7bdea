//! Background credential renewal.
//!
//! One scheduler per session provider: a renewal cycle runs immediately on
//! start, then once per interval. The interval must stay well below the
//! server-side access-token lifetime so a failed tick leaves retry windows
//! before expiry.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::session::SessionStore;

/// Handle to the recurring refresh task. Dropping it aborts the task
/// unconditionally, without waiting for an in-flight request, so no tick can
/// fire after the owning scope is gone.
pub struct RefreshScheduler {
    handle: JoinHandle<()>,
}

impl RefreshScheduler {
    /// Must be called from within a tokio runtime.
    pub fn start(store: Arc<SessionStore>, interval: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // Under a slow network a tick can outlast the period; run late
            // ticks one at a time instead of bursting to catch up.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                // First tick completes immediately: the initial renewal is
                // part of startup, not deferred a full interval.
                ticker.tick().await;
                debug!(target: "arenda::refresh", "refresh tick");
                store.renew().await;
            }
        });
        Self { handle }
    }

    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
