//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// Message returned for bodies that are not the expected JSON document.
pub const INVALID_PAYLOAD: &str = "invalid payload";

/// Validated JSON extractor that automatically validates requests.
///
/// Undecodable bodies (bad JSON, wrong content type, missing fields) are
/// rejected with [`INVALID_PAYLOAD`]; field rule failures report the first
/// rule message so the caller sees a short, stable string.
///
/// # Example
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use validator::Validate;
/// use users_api::api::extractors::ValidatedJson;
///
/// #[derive(Deserialize, Validate)]
/// struct UserPayload {
///     #[validate(email)]
///     email: String,
/// }
///
/// async fn create_user(ValidatedJson(payload): ValidatedJson<UserPayload>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            tracing::debug!(reason = %e.body_text(), "Rejected request body");
            AppError::validation(INVALID_PAYLOAD)
        })?;

        value
            .validate()
            .map_err(|e| AppError::validation(first_validation_message(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Pick the first rule message, in field-name order so the result is stable
fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .next()
        .unwrap_or_else(|| INVALID_PAYLOAD.to_string())
}
