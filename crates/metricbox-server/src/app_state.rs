//! Shared application state for the metricbox server.
//!
//! One `AppState` is built at startup and cloned into every connection task;
//! the registry inside it is the only shared mutable resource.

use std::sync::Arc;

use metricbox_core::error::Result;

use crate::clock::Clock;
use crate::config::ServerConfig;
use crate::store::Registry;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    registry: Arc<Registry>,
}

struct AppStateInner {
    cfg: ServerConfig,
}

impl AppState {
    /// Build application state from a config and the clock used to stamp
    /// samples. The config is validated again here so callers that assemble
    /// one by hand get the same checks as the file loader.
    pub fn new(cfg: ServerConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        cfg.validate()?;
        let registry = Arc::new(Registry::new(cfg.retention.capacity, clock));
        Ok(Self {
            inner: Arc::new(AppStateInner { cfg }),
            registry,
        })
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.registry)
    }
}
