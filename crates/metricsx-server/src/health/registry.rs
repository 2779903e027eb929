use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures_util::future::join_all;
use futures_util::FutureExt;

use metricsx_core::MetricRegistry;

use super::{GaugedHealthCheck, HealthCheck, HealthStatus};

/// Name -> health check map.
#[derive(Default)]
pub struct HealthCheckRegistry {
    checks: DashMap<String, Arc<dyn HealthCheck>>,
}

impl HealthCheckRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `check` unless the name is taken. Returns whether it was added.
    pub fn register(&self, name: impl Into<String>, check: Arc<dyn HealthCheck>) -> bool {
        match self.checks.entry(name.into()) {
            Entry::Occupied(e) => {
                tracing::debug!(name = %e.key(), "health check already registered");
                false
            }
            Entry::Vacant(e) => {
                tracing::debug!(name = %e.key(), "register health check");
                e.insert(check);
                true
            }
        }
    }

    /// Register a check that also reports its healthy-run ratio as a gauge
    /// under the same name.
    ///
    /// Returns `None` (and registers no gauge) when the name is already taken:
    /// a gauge over a wrapper that never runs would read NaN forever.
    pub fn register_gauged<C: HealthCheck + 'static>(
        &self,
        name: &str,
        check: C,
        metrics: &MetricRegistry,
    ) -> Option<Arc<GaugedHealthCheck<C>>> {
        let gauged = Arc::new(GaugedHealthCheck::new(check));
        if !self.register(name, Arc::clone(&gauged) as Arc<dyn HealthCheck>) {
            return None;
        }
        let ratio_source = Arc::clone(&gauged);
        metrics.gauge(name, move || ratio_source.ratio());
        Some(gauged)
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.checks.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run every check concurrently; results sorted by name.
    pub async fn run_all(&self) -> BTreeMap<String, HealthStatus> {
        // copy out first: no map guard may be held across an await
        let checks: Vec<(String, Arc<dyn HealthCheck>)> = self
            .checks
            .iter()
            .map(|e| (e.key().clone(), Arc::clone(e.value())))
            .collect();

        let runs = checks.into_iter().map(|(name, check)| async move {
            let status = run_one(&name, check.as_ref()).await;
            (name, status)
        });

        join_all(runs).await.into_iter().collect()
    }
}

async fn run_one(name: &str, check: &dyn HealthCheck) -> HealthStatus {
    match AssertUnwindSafe(check.check()).catch_unwind().await {
        Ok(Ok(status)) => {
            if !status.healthy {
                tracing::warn!(check = %name, message = ?status.message, "health check unhealthy");
            }
            status
        }
        Ok(Err(e)) => {
            tracing::warn!(check = %name, error = %e, "health check failed");
            HealthStatus::failed(e.to_string())
        }
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "health check panicked".to_string());
            tracing::error!(check = %name, %message, "health check panicked");
            HealthStatus::failed(format!("panicked: {message}"))
        }
    }
}
