//! Shared request/response types.

mod response;

pub use response::{
    Created, CreatedResponse, DeletedResponse, ErrorResponse, HealthResponse, ReadinessResponse,
    UpdatedResponse,
};
