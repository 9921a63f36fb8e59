//! Shared metrics store.
//!
//! One lock guards the snapshot, the random source, and the exporter
//! updates, so a reader sees either all of a tick or none of it. Both read
//! paths (`snapshot`, `render_exposition`) take the same lock.

use std::sync::{Mutex, MutexGuard};

use ecompulse_core::error::{EcomPulseError, Result};
use ecompulse_core::{MetricsSnapshot, RandomSource, TickDraws};

use crate::obs::metrics::DashboardMetrics;

struct StoreInner {
    snapshot: MetricsSnapshot,
    random: Box<dyn RandomSource>,
    ticks: u64,
}

pub struct MetricsStore {
    inner: Mutex<StoreInner>,
    metrics: DashboardMetrics,
}

impl MetricsStore {
    /// Build an all-zero store. Nothing is drawn until the first `tick`.
    pub fn new(random: Box<dyn RandomSource>) -> Result<Self> {
        Ok(Self {
            inner: Mutex::new(StoreInner {
                snapshot: MetricsSnapshot::default(),
                random,
                ticks: 0,
            }),
            metrics: DashboardMetrics::new()?,
        })
    }

    fn read_lock(&self) -> Result<MutexGuard<'_, StoreInner>> {
        self.inner
            .lock()
            .map_err(|_| EcomPulseError::Internal("metrics store lock poisoned".into()))
    }

    /// Draw a new tick and fold it into both the snapshot and the exporter.
    pub fn tick(&self) -> TickDraws {
        // generation never fails; a poisoned lock still holds a usable record
        let mut inner = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("metrics store lock poisoned, recovering");
                self.inner.clear_poison();
                poisoned.into_inner()
            }
        };
        let draws = TickDraws::draw(inner.random.as_mut());
        inner.snapshot.apply(&draws);
        self.metrics.observe(&draws);
        inner.ticks += 1;

        tracing::debug!(
            tick = inner.ticks,
            revenue = inner.snapshot.revenue,
            orders = inner.snapshot.orders,
            failed_requests = inner.snapshot.failed_requests,
            downtime = inner.snapshot.downtime,
            "metrics tick"
        );
        draws
    }

    /// Copy of the live values. Two calls may straddle a tick.
    pub fn snapshot(&self) -> Result<MetricsSnapshot> {
        Ok(self.read_lock()?.snapshot.clone())
    }

    /// Exposition text for the same tick `snapshot` would return.
    pub fn render_exposition(&self) -> Result<String> {
        let _guard = self.read_lock()?;
        self.metrics.render()
    }

    pub fn tick_count(&self) -> u64 {
        self.inner
            .lock()
            .map(|g| g.ticks)
            .unwrap_or_else(|poisoned| poisoned.into_inner().ticks)
    }
}
