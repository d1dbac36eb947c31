//! Custom request extractors.

mod user_id;
mod validated_json;

pub use user_id::{UserId, INVALID_USER_ID};
pub use validated_json::{ValidatedJson, INVALID_PAYLOAD};
