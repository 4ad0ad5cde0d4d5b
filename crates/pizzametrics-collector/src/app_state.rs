//! Shared application state.
//!
//! The composition root builds one `Collector` here and hands clones of the
//! `Arc` to every handler and middleware that records events.

use std::sync::Arc;

use crate::config::CollectorConfig;
use crate::obs::Collector;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    collector: Arc<Collector>,
}

struct AppStateInner {
    cfg: CollectorConfig,
}

impl AppState {
    pub fn new(cfg: CollectorConfig) -> Self {
        Self::with_collector(cfg, Arc::new(Collector::new()))
    }

    pub fn with_collector(cfg: CollectorConfig, collector: Arc<Collector>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { cfg }),
            collector,
        }
    }

    pub fn cfg(&self) -> &CollectorConfig {
        &self.inner.cfg
    }

    pub fn collector(&self) -> Arc<Collector> {
        Arc::clone(&self.collector)
    }
}
