//! Application state - Dependency injection container.
//!
//! Handlers receive their collaborators through this struct; nothing is
//! reached through process-wide globals.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, DEFAULT_READINESS_TIMEOUT_MS};
use crate::infra::{ConnectivityProbe, Database, UserRepository, UserStore};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// User data access
    pub users: Arc<dyn UserRepository>,
    /// Store connectivity check used by `/readyz`
    pub probe: Arc<dyn ConnectivityProbe>,
    /// Upper bound on a single readiness probe
    pub readiness_timeout: Duration,
}

impl AppState {
    /// Create application state over a connected pool.
    pub fn from_database(database: &Database, config: &Config) -> Self {
        Self {
            users: Arc::new(UserStore::new(database.get_connection())),
            probe: Arc::new(database.clone()),
            readiness_timeout: config.readiness_timeout,
        }
    }

    /// Create new application state with manually injected collaborators.
    pub fn new(users: Arc<dyn UserRepository>, probe: Arc<dyn ConnectivityProbe>) -> Self {
        Self {
            users,
            probe,
            readiness_timeout: Duration::from_millis(DEFAULT_READINESS_TIMEOUT_MS),
        }
    }

    /// Override the readiness probe bound.
    pub fn with_readiness_timeout(mut self, timeout: Duration) -> Self {
        self.readiness_timeout = timeout;
        self
    }
}
