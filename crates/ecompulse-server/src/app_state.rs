//! Shared application state for the EcomPulse server.

use std::sync::Arc;

use ecompulse_core::error::Result;
use ecompulse_core::{RandomSource, StdRandom};

use crate::config::AppConfig;
use crate::store::MetricsStore;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    store: Arc<MetricsStore>,
}

struct AppStateInner {
    cfg: AppConfig,
}

impl AppState {
    /// Build state with the random source the config asks for.
    pub fn new(cfg: AppConfig) -> Result<Self> {
        let random: Box<dyn RandomSource> = match cfg.generator.seed {
            Some(seed) => {
                tracing::info!(seed, "using seeded random source");
                Box::new(StdRandom::seeded(seed))
            }
            None => Box::new(StdRandom::from_entropy()),
        };
        Self::with_random(cfg, random)
    }

    /// Build state around an explicit random source (tests inject scripted ones).
    pub fn with_random(cfg: AppConfig, random: Box<dyn RandomSource>) -> Result<Self> {
        let store = Arc::new(MetricsStore::new(random)?);
        Ok(Self {
            inner: Arc::new(AppStateInner { cfg }),
            store,
        })
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> Arc<MetricsStore> {
        Arc::clone(&self.store)
    }
}
