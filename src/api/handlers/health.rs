//! Health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::state::AppState;

/// Health probe response body.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub cache: bool,
}

/// Reports reachability of both stores.
///
/// # Endpoint
///
/// `GET /health`
///
/// Returns `200` when the durable store is reachable, `503` otherwise. Cache
/// health is reported but not gating: the service degrades rather than dies
/// when the cache backend flaps.
pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = state.links.health_check().await;
    let cache = state.cache.health_check().await;

    let status_code = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    let status = if database && cache { "ok" } else { "degraded" };

    (
        status_code,
        Json(HealthResponse {
            status,
            database,
            cache,
        }),
    )
}
