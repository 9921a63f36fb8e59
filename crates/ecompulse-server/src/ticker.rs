//! Scheduled tick task.
//!
//! `Ticker::start` runs the first tick inline, so the store is populated
//! before the listener accepts connections, then drives `MetricsStore::tick`
//! on a fixed period until `shutdown` is called.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::store::MetricsStore;

pub struct Ticker {
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Ticker {
    /// Must be called from within a tokio runtime.
    pub fn start(store: Arc<MetricsStore>, period: Duration) -> Self {
        store.tick();

        let (stop_tx, mut stop_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        store.tick();
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            tracing::info!(ticks = store.tick_count(), "metrics ticker stopped");
        });

        tracing::info!(period_ms = period.as_millis() as u64, "metrics ticker started");
        Self { stop_tx, task }
    }

    /// Stop the task and wait for it to exit.
    pub async fn shutdown(self) {
        let _ = self.stop_tx.send(true);
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "metrics ticker task ended abnormally");
        }
    }
}
