//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness
//! - `/metrics` : registry snapshot, JSON map or YAML tree per `Accept`
//! - `/health`  : health check results, 500 when any check is unhealthy

pub mod negotiate;

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use metricsx_core::error::MetricsError;
use metricsx_core::render::{render_json, render_tree};

use crate::{app_state::AppState, error::ApiError};

pub use negotiate::{negotiate, MediaType};

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn metrics(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, ApiError> {
    let snapshot = state.metrics().snapshot();

    match negotiate(&headers) {
        MediaType::Json => Ok(Json(render_json(&snapshot)).into_response()),
        media @ MediaType::Yaml => {
            let body = render_tree(&snapshot)?;
            Ok((StatusCode::OK, [(CONTENT_TYPE, media.content_type())], body).into_response())
        }
    }
}

pub async fn health(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, ApiError> {
    let results = state.health().run_all().await;
    let status = if results.values().all(|s| s.healthy) {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    match negotiate(&headers) {
        MediaType::Json => Ok((status, Json(results)).into_response()),
        media @ MediaType::Yaml => {
            let body = serde_yaml::to_string(&results)
                .map_err(|e| MetricsError::Internal(format!("health yaml encode failed: {e}")))?;
            Ok((status, [(CONTENT_TYPE, media.content_type())], body).into_response())
        }
    }
}
