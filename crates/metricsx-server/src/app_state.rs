//! Shared application state.

use std::sync::Arc;
use std::time::Instant;

use metricsx_core::error::Result;
use metricsx_core::MetricRegistry;

use crate::config::MetricsxConfig;
use crate::health::{HealthCheckRegistry, SelfCheck};

/// Name of the built-in liveness check (and of its ratio gauge).
pub const SELF_CHECK: &str = "metricsx.self";

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: MetricsxConfig,
    metrics: Arc<MetricRegistry>,
    health: Arc<HealthCheckRegistry>,
}

impl AppState {
    /// Build the registries and register the built-in gauges and checks.
    pub fn new(cfg: MetricsxConfig) -> Result<Self> {
        cfg.validate()?;

        let started = Instant::now();
        let metrics = Arc::new(MetricRegistry::with_reservoir_size(cfg.metrics.reservoir_size));
        let health = Arc::new(HealthCheckRegistry::new());

        if cfg.metrics.process_gauges {
            metrics.gauge("process.uptime_secs", move || started.elapsed().as_secs());
            metrics.gauge("process.pid", std::process::id);
        }

        health.register_gauged(SELF_CHECK, SelfCheck::new(started), &metrics);

        tracing::info!(
            metrics = metrics.len(),
            checks = health.len(),
            reservoir_size = cfg.metrics.reservoir_size,
            "app state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, metrics, health }),
        })
    }

    pub fn cfg(&self) -> &MetricsxConfig {
        &self.inner.cfg
    }

    pub fn metrics(&self) -> &Arc<MetricRegistry> {
        &self.inner.metrics
    }

    pub fn health(&self) -> &Arc<HealthCheckRegistry> {
        &self.inner.health
    }
}
