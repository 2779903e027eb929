use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use metricsx_core::error::Result;
use metricsx_core::metric::ratio;

use super::{HealthCheck, HealthStatus};

/// Health check that remembers how many of its runs were healthy.
///
/// `ratio()` is `healthy / total` since process start (NaN before the first
/// run). Failed runs count as unhealthy.
pub struct GaugedHealthCheck<C> {
    inner: C,
    total: AtomicU64,
    healthy: AtomicU64,
}

impl<C: HealthCheck> GaugedHealthCheck<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            total: AtomicU64::new(0),
            healthy: AtomicU64::new(0),
        }
    }

    /// `(healthy, total)` run counts.
    pub fn runs(&self) -> (u64, u64) {
        (self.healthy.load(Ordering::Relaxed), self.total.load(Ordering::Relaxed))
    }

    pub fn ratio(&self) -> f64 {
        let (healthy, total) = self.runs();
        ratio(healthy as f64, total as f64)
    }
}

#[async_trait]
impl<C: HealthCheck> HealthCheck for GaugedHealthCheck<C> {
    async fn check(&self) -> Result<HealthStatus> {
        let result = self.inner.check().await;

        let total = self.total.fetch_add(1, Ordering::Relaxed) + 1;
        let healthy = if matches!(&result, Ok(s) if s.healthy) {
            self.healthy.fetch_add(1, Ordering::Relaxed) + 1
        } else {
            self.healthy.load(Ordering::Relaxed)
        };
        tracing::debug!(healthy, total, "gauged health check ran");

        result
    }
}
