//! Domain layer - Core business entities
//!
//! The single `User` entity, independent of storage and transport.

pub mod user;

pub use user::User;
