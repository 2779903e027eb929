#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use metricsx_core::error::{MetricsError, Result};
use metricsx_core::{MetricRegistry, Value};
use metricsx_server::health::{HealthCheck, HealthCheckRegistry, HealthStatus};

struct Fixed(bool);

#[async_trait]
impl HealthCheck for Fixed {
    async fn check(&self) -> Result<HealthStatus> {
        Ok(if self.0 {
            HealthStatus::healthy("fine")
        } else {
            HealthStatus::unhealthy("degraded")
        })
    }
}

struct Failing;

#[async_trait]
impl HealthCheck for Failing {
    async fn check(&self) -> Result<HealthStatus> {
        Err(MetricsError::Internal("db unreachable".into()))
    }
}

struct Panicking;

#[async_trait]
impl HealthCheck for Panicking {
    async fn check(&self) -> Result<HealthStatus> {
        panic!("boom");
    }
}

/// Healthy until flipped.
struct Toggle(Arc<AtomicBool>);

#[async_trait]
impl HealthCheck for Toggle {
    async fn check(&self) -> Result<HealthStatus> {
        Ok(if self.0.load(Ordering::SeqCst) {
            HealthStatus::healthy("up")
        } else {
            HealthStatus::unhealthy("down")
        })
    }
}

#[tokio::test]
async fn failing_and_panicking_checks_do_not_abort_others() {
    let registry = HealthCheckRegistry::new();
    registry.register("a.ok", Arc::new(Fixed(true)));
    registry.register("b.failing", Arc::new(Failing));
    registry.register("c.panicking", Arc::new(Panicking));
    registry.register("d.unhealthy", Arc::new(Fixed(false)));

    let results = registry.run_all().await;

    assert_eq!(results.keys().collect::<Vec<_>>(), ["a.ok", "b.failing", "c.panicking", "d.unhealthy"]);
    assert_eq!(results["a.ok"], HealthStatus::healthy("fine"));
    assert_eq!(results["b.failing"], HealthStatus::failed("internal: db unreachable"));
    assert_eq!(results["c.panicking"], HealthStatus::failed("panicked: boom"));
    assert!(!results["d.unhealthy"].healthy);
    assert_eq!(results["d.unhealthy"].error, None);
}

#[tokio::test]
async fn register_is_idempotent() {
    let registry = HealthCheckRegistry::new();
    assert!(registry.register("x", Arc::new(Fixed(true))));
    assert!(!registry.register("x", Arc::new(Fixed(false))));

    assert_eq!(registry.names(), ["x"]);
    assert!(registry.run_all().await["x"].healthy);
}

#[tokio::test]
async fn gauged_check_exposes_healthy_ratio() {
    let metrics = MetricRegistry::new();
    let health = HealthCheckRegistry::new();
    let up = Arc::new(AtomicBool::new(true));

    let gauged = health.register_gauged("db", Toggle(Arc::clone(&up)), &metrics).unwrap();
    let gauge = metrics.get("db").unwrap();

    match gauge.as_gauge().unwrap().value() {
        Value::Float(v) => assert!(v.is_nan()),
        other => panic!("unexpected {other:?}"),
    }

    health.run_all().await;
    up.store(false, Ordering::SeqCst);
    health.run_all().await;
    health.run_all().await;
    up.store(true, Ordering::SeqCst);
    health.run_all().await;

    assert_eq!(gauged.runs(), (2, 4));
    assert_eq!(gauge.as_gauge().unwrap().value(), Value::Float(0.5));
}

#[tokio::test]
async fn empty_registry_runs_nothing() {
    let registry = HealthCheckRegistry::new();
    assert!(registry.is_empty());
    assert!(registry.run_all().await.is_empty());
}

#[tokio::test]
async fn gauged_check_under_a_taken_name_adds_no_gauge() {
    let metrics = MetricRegistry::new();
    let health = HealthCheckRegistry::new();
    health.register("db", Arc::new(Fixed(false)));

    let gauged = health.register_gauged("db", Fixed(true), &metrics);

    assert!(gauged.is_none());
    assert!(!metrics.contains("db"));
    // the first check stays in place
    assert!(!health.run_all().await["db"].healthy);
}
