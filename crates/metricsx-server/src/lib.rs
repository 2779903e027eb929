//! metricsx server: HTTP exposure of a metric registry and health checks.

pub mod app_state;
pub mod config;
pub mod error;
pub mod health;
pub mod ops;
pub mod reporter;
pub mod router;
pub mod timing;
