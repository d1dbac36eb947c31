//! Liveness and readiness probes.

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};

use crate::api::AppState;
use crate::types::{HealthResponse, ReadinessResponse};

/// Create probe routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}

/// Liveness: the process is up and serving
#[utoipa::path(
    get,
    path = "/healthz",
    tag = "Health",
    responses(
        (status = 200, description = "Process is alive", body = HealthResponse)
    )
)]
pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness: the store answered a ping within the configured bound
#[utoipa::path(
    get,
    path = "/readyz",
    tag = "Health",
    responses(
        (status = 200, description = "Store reachable", body = ReadinessResponse),
        (status = 503, description = "Store unreachable or probe timed out", body = ReadinessResponse)
    )
)]
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    // Dropping the probe future on timeout cancels the in-flight round-trip.
    match tokio::time::timeout(state.readiness_timeout, state.probe.ping()).await {
        Ok(Ok(())) => (StatusCode::OK, Json(ReadinessResponse { ready: true })),
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Readiness probe failed");
            not_ready()
        }
        Err(_) => {
            tracing::warn!(
                timeout_ms = state.readiness_timeout.as_millis() as u64,
                "Readiness probe timed out"
            );
            not_ready()
        }
    }
}

fn not_ready() -> (StatusCode, Json<ReadinessResponse>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ReadinessResponse { ready: false }),
    )
}
