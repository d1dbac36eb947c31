//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion. Store failures are logged
//! in full and surfaced to callers only as a short, stable message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::types::ErrorResponse;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Client errors
    #[error("{0}")]
    Validation(String),

    #[error("user not found")]
    NotFound,

    #[error("route not found")]
    RouteNotFound,

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("request timed out")]
    Timeout,

    // Store errors
    #[error("write conflict: {0}")]
    WriteConflict(#[source] DbErr),

    #[error("store unreachable: {0}")]
    Connectivity(String),

    #[error("database error: {0}")]
    Database(#[source] DbErr),

    // Startup / internal
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Connectivity(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::WriteConflict(_)
            | AppError::Database(_)
            | AppError::Configuration(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            // Show full message for client errors
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound
            | AppError::RouteNotFound
            | AppError::MethodNotAllowed
            | AppError::Timeout => self.to_string(),

            // Hide details for store and internal errors
            AppError::WriteConflict(e) => {
                tracing::error!(error = ?e, "Write conflict");
                "internal server error".to_string()
            }
            AppError::Database(e) => {
                tracing::error!(error = ?e, "Database error");
                "internal server error".to_string()
            }
            AppError::Connectivity(msg) => {
                tracing::error!("Store unreachable: {}", msg);
                "service unavailable".to_string()
            }
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                "internal server error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "internal server error".to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Classifies store errors: constraint violations become `WriteConflict`,
/// everything else stays an unclassified `Database` error.
impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        let kind = err.sql_err();
        classify_store_error(err, kind)
    }
}

fn classify_store_error(err: DbErr, kind: Option<SqlErr>) -> AppError {
    match kind {
        Some(SqlErr::UniqueConstraintViolation(_))
        | Some(SqlErr::ForeignKeyConstraintViolation(_)) => AppError::WriteConflict(err),
        _ => AppError::Database(err),
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn connectivity(msg: impl Into<String>) -> Self {
        AppError::Connectivity(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::Configuration(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_error_echoes_message() {
        let (status, body) = body_json(AppError::validation("invalid user id")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "invalid user id" }));
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let (status, body) = body_json(AppError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "user not found");
    }

    #[tokio::test]
    async fn database_error_hides_store_text() {
        let err = AppError::from(DbErr::Custom("relation \"users\" does not exist".into()));
        assert!(matches!(err, AppError::Database(_)));

        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal server error");
        assert!(!body.to_string().contains("relation"));
    }

    #[test]
    fn unique_violation_is_classified_as_write_conflict() {
        let err = classify_store_error(
            DbErr::Custom("duplicate key value".into()),
            Some(SqlErr::UniqueConstraintViolation("users_email_key".into())),
        );
        assert!(matches!(err, AppError::WriteConflict(_)));

        let err = classify_store_error(
            DbErr::Custom("violates foreign key".into()),
            Some(SqlErr::ForeignKeyConstraintViolation("fk".into())),
        );
        assert!(matches!(err, AppError::WriteConflict(_)));
    }

    #[test]
    fn unclassified_store_error_stays_database() {
        let err = classify_store_error(DbErr::Custom("connection reset".into()), None);
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn write_conflict_is_a_generic_500() {
        let err = classify_store_error(
            DbErr::Custom("duplicate key".into()),
            Some(SqlErr::UniqueConstraintViolation("users_email_key".into())),
        );
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "internal server error");
    }

    #[test]
    fn connectivity_maps_to_503() {
        assert_eq!(
            AppError::connectivity("refused").status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn timeout_maps_to_408() {
        assert_eq!(AppError::Timeout.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
