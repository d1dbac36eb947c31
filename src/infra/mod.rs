//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Connection pool to the relational store
//! - Repositories over that pool

pub mod db;
pub mod repositories;

pub use db::{ConnectivityProbe, Database};
pub use repositories::{UserRepository, UserStore};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
