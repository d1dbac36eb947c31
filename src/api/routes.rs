//! Application route configuration.

use std::time::Duration;

use axum::{response::Json, routing::get, Router};
use utoipa::OpenApi;

use super::handlers::{health_routes, user_routes};
use super::middleware::with_request_stages;
use super::openapi::ApiDoc;
use super::AppState;
use crate::errors::AppError;

/// Create the application router with all routes and request stages configured
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let router = Router::new()
        // Probes
        .merge(health_routes())
        // User CRUD
        .nest("/users", user_routes())
        // OpenAPI document
        .route("/api-docs/openapi.json", get(openapi_json))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .with_state(state);

    with_request_stages(router, request_timeout)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
