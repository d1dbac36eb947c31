//! User CRUD handlers.

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::{UserId, ValidatedJson};
use crate::api::AppState;
use crate::domain::User;
use crate::errors::AppResult;
use crate::types::{Created, CreatedResponse, DeletedResponse, ErrorResponse, UpdatedResponse};

/// Body accepted by create and update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UserPayload {
    /// Display name
    #[validate(length(min = 1, message = "name is required"))]
    #[schema(example = "Charlie")]
    pub name: String,
    /// Unique email address
    #[validate(email(message = "email must be a valid email address"))]
    #[schema(example = "charlie@example.com")]
    pub email: String,
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// List all users, ascending by id
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "Every user", body = Vec<User>),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.users.list_all().await?;
    Ok(Json(users))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<Json<User>> {
    let user = state.users.get_by_id(id).await?;
    Ok(Json(user))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "User created", body = CreatedResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Write failed", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> AppResult<Created<CreatedResponse>> {
    let id = state.users.create(payload.name, payload.email).await?;
    tracing::info!(user_id = id, "User created");
    Ok(Created(CreatedResponse { id }))
}

/// Replace a user's name and email
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "User updated", body = UpdatedResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    ValidatedJson(payload): ValidatedJson<UserPayload>,
) -> AppResult<Json<UpdatedResponse>> {
    state.users.update(id, payload.name, payload.email).await?;
    Ok(Json(UpdatedResponse { updated: true }))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = DeletedResponse),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<Json<DeletedResponse>> {
    state.users.delete(id).await?;
    tracing::info!(user_id = id, "User deleted");
    Ok(Json(DeletedResponse { deleted: true }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use mockall::predicate::eq;
    use sea_orm::DbErr;
    use tower::ServiceExt;

    use super::*;
    use crate::errors::AppError;
    use crate::infra::{ConnectivityProbe, MockUserRepository};

    struct AlwaysUp;

    #[async_trait]
    impl ConnectivityProbe for AlwaysUp {
        async fn ping(&self) -> Result<(), DbErr> {
            Ok(())
        }
    }

    fn app(repo: MockUserRepository) -> Router {
        let state = AppState::new(Arc::new(repo), Arc::new(AlwaysUp));
        Router::new().nest("/users", user_routes()).with_state(state)
    }

    async fn send(
        app: Router,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn charlie() -> serde_json::Value {
        serde_json::json!({ "name": "Charlie", "email": "charlie@example.com" })
    }

    #[tokio::test]
    async fn list_returns_users_as_json_array() {
        let mut repo = MockUserRepository::new();
        repo.expect_list_all().returning(|| {
            Ok(vec![
                User::new(1, "Alice", "alice@example.com"),
                User::new(2, "Bob", "bob@example.com"),
            ])
        });

        let (status, body) = send(app(repo), Method::GET, "/users", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!([
                { "id": 1, "name": "Alice", "email": "alice@example.com" },
                { "id": 2, "name": "Bob", "email": "bob@example.com" }
            ])
        );
    }

    #[tokio::test]
    async fn get_unknown_user_is_404() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id()
            .with(eq(99))
            .returning(|_| Err(AppError::NotFound));

        let (status, body) = send(app(repo), Method::GET, "/users/99", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "user not found");
    }

    #[tokio::test]
    async fn non_numeric_id_never_reaches_repository() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_id().never();
        repo.expect_delete().never();

        let (status, body) = send(app(repo), Method::GET, "/users/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid user id");
    }

    #[tokio::test]
    async fn create_returns_201_with_id() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .with(eq("Charlie".to_string()), eq("charlie@example.com".to_string()))
            .times(1)
            .returning(|_, _| Ok(7));

        let (status, body) = send(app(repo), Method::POST, "/users", Some(charlie())).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, serde_json::json!({ "id": 7 }));
    }

    #[tokio::test]
    async fn create_with_empty_name_is_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().never();

        let payload = serde_json::json!({ "name": "", "email": "charlie@example.com" });
        let (status, body) = send(app(repo), Method::POST, "/users", Some(payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "name is required");
    }

    #[tokio::test]
    async fn create_with_bad_email_is_rejected() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().never();

        let payload = serde_json::json!({ "name": "Charlie", "email": "not-an-email" });
        let (status, body) = send(app(repo), Method::POST, "/users", Some(payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "email must be a valid email address");
    }

    #[tokio::test]
    async fn create_with_missing_field_is_invalid_payload() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().never();

        let payload = serde_json::json!({ "name": "Charlie" });
        let (status, body) = send(app(repo), Method::POST, "/users", Some(payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid payload");
    }

    #[tokio::test]
    async fn duplicate_email_surfaces_as_generic_500() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().returning(|_, _| {
            Err(AppError::WriteConflict(DbErr::Custom(
                "duplicate key value violates unique constraint \"users_email_key\"".into(),
            )))
        });

        let (status, body) = send(app(repo), Method::POST, "/users", Some(charlie())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({ "error": "internal server error" }));
    }

    #[tokio::test]
    async fn update_missing_user_is_404() {
        let mut repo = MockUserRepository::new();
        repo.expect_update()
            .with(eq(404), eq("Charlie".to_string()), eq("charlie@example.com".to_string()))
            .returning(|_, _, _| Err(AppError::NotFound));

        let (status, _) = send(app(repo), Method::PUT, "/users/404", Some(charlie())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_existing_user_acknowledges() {
        let mut repo = MockUserRepository::new();
        repo.expect_update().returning(|_, _, _| Ok(()));

        let (status, body) = send(app(repo), Method::PUT, "/users/1", Some(charlie())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "updated": true }));
    }

    #[tokio::test]
    async fn delete_existing_user_acknowledges() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().with(eq(1)).returning(|_| Ok(()));

        let (status, body) = send(app(repo), Method::DELETE, "/users/1", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "deleted": true }));
    }

    #[tokio::test]
    async fn delete_missing_user_is_404() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().returning(|_| Err(AppError::NotFound));

        let (status, body) = send(app(repo), Method::DELETE, "/users/5", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "user not found");
    }
}
