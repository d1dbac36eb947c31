//! Strict `{id}` path parameter extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::errors::AppError;

/// Message returned when the `{id}` segment is not a 64-bit integer.
pub const INVALID_USER_ID: &str = "invalid user id";

/// User identifier parsed from the `{id}` path segment.
///
/// Anything that is not a base-10 `i64` is rejected with a 400 before a
/// handler (and therefore the store) is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::validation(INVALID_USER_ID))?;

        parse_user_id(&raw).map(UserId)
    }
}

fn parse_user_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::validation(INVALID_USER_ID))
}
