//! Health checks.
//!
//! Checks are async and run concurrently on every `/health` request. A check
//! that returns an error or panics is reported as unhealthy; it never takes
//! the other checks or the endpoint down with it.

pub mod gauged;
pub mod registry;

use std::time::Instant;

use async_trait::async_trait;
use serde::Serialize;

use metricsx_core::error::Result;

pub use gauged::GaugedHealthCheck;
pub use registry::HealthCheckRegistry;

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn check(&self) -> Result<HealthStatus>;
}

/// Outcome of one check run, serialized as `{healthy, message, error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub healthy: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl HealthStatus {
    pub fn healthy(message: impl Into<String>) -> Self {
        Self { healthy: true, message: Some(message.into()), error: None }
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self { healthy: false, message: Some(message.into()), error: None }
    }

    /// Unhealthy result for a check that failed to run.
    pub fn failed(error: impl Into<String>) -> Self {
        Self { healthy: false, message: None, error: Some(error.into()) }
    }
}

/// Liveness of the server process itself.
pub struct SelfCheck {
    started: Instant,
}

impl SelfCheck {
    pub fn new(started: Instant) -> Self {
        Self { started }
    }
}

#[async_trait]
impl HealthCheck for SelfCheck {
    async fn check(&self) -> Result<HealthStatus> {
        Ok(HealthStatus::healthy(format!("up {}s", self.started.elapsed().as_secs())))
    }
}
