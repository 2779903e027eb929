//! Per-resource request timing.
//!
//! Every routed request records, under `resources<path>|<METHOD>`:
//! a timer (`|timer`), a meter per status family (`|SUCCESSFUL`, ...) and a
//! meter per status code (`|200`, ...). Outbound calls use the `calls` prefix.

use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use metricsx_core::error::Result;
use metricsx_core::MetricRegistry;

use crate::app_state::AppState;

pub const RESOURCES: &str = "resources";
pub const CALLS: &str = "calls";

/// Status class name for a status code.
pub fn status_family(status: u16) -> &'static str {
    match status {
        100..=199 => "INFORMATIONAL",
        200..=299 => "SUCCESSFUL",
        300..=399 => "REDIRECTION",
        400..=499 => "CLIENT_ERROR",
        500..=599 => "SERVER_ERROR",
        _ => "OTHER",
    }
}

/// `resources/users|GET`-style base name.
pub fn timing_name(kind: &str, path: &str, method: &str) -> String {
    let slash = if path.starts_with('/') { "" } else { "/" };
    format!("{kind}{slash}{path}|{method}")
}

/// Record one completed request or call under `base`.
pub fn record(registry: &MetricRegistry, base: &str, status: u16, elapsed: Duration) -> Result<()> {
    registry.timer(&format!("{base}|timer"))?.update(elapsed);
    registry.meter(&format!("{base}|{}", status_family(status)))?.mark();
    registry.meter(&format!("{base}|{status}"))?.mark();
    Ok(())
}

/// Record an outbound call made by this process.
pub fn record_call(
    registry: &MetricRegistry,
    path: &str,
    method: &str,
    status: u16,
    elapsed: Duration,
) -> Result<()> {
    record(registry, &timing_name(CALLS, path, method), status, elapsed)
}

/// Axum middleware timing each routed request.
///
/// The route template (`/users/:id`) is used when available so path
/// parameters do not create one metric per value.
pub async fn track_resources(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if !state.cfg().metrics.resource_timing {
        return next.run(req).await;
    }

    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let base = timing_name(RESOURCES, &path, req.method().as_str());

    let start = Instant::now();
    let resp = next.run(req).await;
    let elapsed = start.elapsed();

    let status = resp.status().as_u16();
    if let Err(e) = record(state.metrics(), &base, status, elapsed) {
        tracing::warn!(name = %base, error = %e, "request timing not recorded");
    }
    tracing::debug!(name = %base, status, elapsed_us = elapsed.as_micros() as u64, "request timed");

    resp
}
