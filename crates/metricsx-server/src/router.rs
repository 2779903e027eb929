//! Axum router wiring.
//!
//! `/metrics` and `/health` are also served under their `/-metrics` and
//! `/-healthchecks` admin aliases. Request timing is a route layer, so only
//! matched routes are timed and unknown paths cannot grow the registry.

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, ops, timing};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .route("/-metrics", get(ops::metrics))
        .route("/health", get(ops::health))
        .route("/-healthchecks", get(ops::health))
        .route_layer(middleware::from_fn_with_state(state.clone(), timing::track_resources))
        .with_state(state)
}
