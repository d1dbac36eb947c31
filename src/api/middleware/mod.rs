//! API middleware.

mod stages;

pub use stages::with_request_stages;
