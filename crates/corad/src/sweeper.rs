//! Background session sweeper
//!
//! Complements the lazy expiry check on every store access: sessions that go
//! idle and are never touched again still get evicted on a fixed cadence.

use crate::session::SharedSessions;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Spawn the sweep loop. The handle is detached for the daemon's lifetime;
/// tests hold on to it to abort the task.
pub fn spawn(sessions: SharedSessions, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let evicted = sessions.write().await.sweep();
            if evicted > 0 {
                info!("[SWEEP] Evicted {} idle session(s)", evicted);
            } else {
                debug!("[SWEEP] Nothing to evict");
            }
        }
    })
}
