//! User domain entity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// User domain entity
///
/// `id` and `created_at` are assigned by the store and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct User {
    /// Store-assigned identifier
    #[schema(example = 1)]
    pub id: i64,
    /// Display name
    #[schema(example = "Charlie")]
    pub name: String,
    /// Unique email address
    #[schema(example = "charlie@example.com")]
    pub email: String,
    /// Creation timestamp (not part of the wire shape)
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a user value with the given identity and fields
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }
}
