//! Shared application state for the promgate server.
//!
//! The metric registry is created (or injected) here once at startup and
//! handed to the middleware and the `/metrics` handler; there is no global
//! registry.

use std::sync::Arc;

use promgate_core::error::Result;
use promgate_core::Registry;

use crate::config::ServerConfig;
use crate::obs::HttpMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: ServerConfig,
    registry: Arc<Registry>,
    http: Option<HttpMetrics>,
}

impl AppState {
    /// Build application state with a fresh registry.
    pub fn new(cfg: ServerConfig) -> Result<Self> {
        Self::with_registry(cfg, Arc::new(Registry::new()))
    }

    /// Build application state around an existing registry.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn with_registry(cfg: ServerConfig, registry: Arc<Registry>) -> Result<Self> {
        let http = if cfg.metrics.enabled {
            Some(HttpMetrics::register(&registry, &cfg.metrics.duration_buckets)?)
        } else {
            tracing::info!("http metrics disabled");
            None
        };

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, registry, http }),
        })
    }

    pub fn cfg(&self) -> &ServerConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<Registry> {
        Arc::clone(&self.inner.registry)
    }

    /// HTTP metric handles, `None` when metrics are disabled.
    pub fn http_metrics(&self) -> Option<&HttpMetrics> {
        self.inner.http.as_ref()
    }
}
