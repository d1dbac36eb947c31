//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::api::handlers::{health_handler, user_handler};
use crate::domain::User;
use crate::types::{
    CreatedResponse, DeletedResponse, ErrorResponse, HealthResponse, ReadinessResponse,
    UpdatedResponse,
};

/// OpenAPI documentation for the users API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        version = "0.1.0",
        description = "Minimal user CRUD service over PostgreSQL with health probes",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // Probes
        health_handler::healthz,
        health_handler::readyz,
        // User endpoints
        user_handler::list_users,
        user_handler::get_user,
        user_handler::create_user,
        user_handler::update_user,
        user_handler::delete_user,
    ),
    components(
        schemas(
            User,
            user_handler::UserPayload,
            HealthResponse,
            ReadinessResponse,
            CreatedResponse,
            UpdatedResponse,
            DeletedResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Users", description = "User management operations")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        for expected in ["/healthz", "/readyz", "/users", "/users/{id}"] {
            assert!(paths.iter().any(|p| p == expected), "missing {}", expected);
        }
    }
}
