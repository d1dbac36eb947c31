//! Ordered request-processing stages applied around the router.
//!
//! Outermost first: logging, recovery from handler panics, the request
//! deadline, then routing.

use std::any::Any;
use std::time::Duration;

use axum::{
    error_handling::HandleErrorLayer,
    response::{IntoResponse, Response},
    BoxError, Router,
};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::errors::AppError;

/// Wrap `router` in the request stages.
pub fn with_request_stages(router: Router, request_timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(recover_from_panic))
            .layer(HandleErrorLayer::new(handle_stage_error))
            .timeout(request_timeout),
    )
}

/// Turn a handler panic into a plain 500.
fn recover_from_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::internal(format!("handler panicked: {}", detail)).into_response()
}

async fn handle_stage_error(err: BoxError) -> AppError {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("Request exceeded its deadline");
        AppError::Timeout
    } else {
        AppError::internal(format!("unhandled stage error: {}", err))
    }
}
