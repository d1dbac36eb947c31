//! Application settings loaded from environment variables.

use std::env;
use std::time::Duration;

use super::constants::{
    DATABASE_URL_VAR, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MAX_CONNECTIONS,
    DEFAULT_MIN_CONNECTIONS, DEFAULT_READINESS_TIMEOUT_MS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SHUTDOWN_GRACE_SECS,
};
use crate::errors::{AppError, AppResult};

/// Connection pool settings.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    /// Bound on the `/readyz` store probe
    pub readiness_timeout: Duration,
    /// Drain period after a shutdown signal
    pub shutdown_grace: Duration,
    /// Per-request deadline
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present).
    ///
    /// Fails when `DATABASE_URL` is missing or empty.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup(DATABASE_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::configuration(format!("{} is required", DATABASE_URL_VAR)))?;

        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());

        Ok(Self {
            database: DatabaseConfig {
                url,
                max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(DEFAULT_MAX_CONNECTIONS),
                min_connections: lookup("DATABASE_MIN_CONNECTIONS")
                    .and_then(|v| v.trim().parse().ok())
                    .unwrap_or(DEFAULT_MIN_CONNECTIONS),
                connect_timeout: Duration::from_secs(
                    parsed("DATABASE_CONNECT_TIMEOUT_SECS").unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
                ),
            },
            readiness_timeout: Duration::from_millis(
                parsed("READINESS_TIMEOUT_MS").unwrap_or(DEFAULT_READINESS_TIMEOUT_MS),
            ),
            shutdown_grace: Duration::from_secs(
                parsed("SHUTDOWN_GRACE_SECS").unwrap_or(DEFAULT_SHUTDOWN_GRACE_SECS),
            ),
            request_timeout: Duration::from_secs(
                parsed("REQUEST_TIMEOUT_SECS").unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_database_url_is_fatal() {
        let result = Config::from_lookup(lookup(&[]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn blank_database_url_is_fatal() {
        let result = Config::from_lookup(lookup(&[("DATABASE_URL", "  ")]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://db/users")])).unwrap();

        assert_eq!(config.database.url, "postgres://db/users");
        assert_eq!(config.database.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.database.min_connections, DEFAULT_MIN_CONNECTIONS);
        assert_eq!(config.readiness_timeout, Duration::from_secs(1));
        assert_eq!(config.shutdown_grace, Duration::from_secs(5));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn overrides_and_bad_numbers() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db/users"),
            ("DATABASE_MAX_CONNECTIONS", "25"),
            ("READINESS_TIMEOUT_MS", "250"),
            ("SHUTDOWN_GRACE_SECS", "soon"),
        ]))
        .unwrap();

        assert_eq!(config.database.max_connections, 25);
        assert_eq!(config.readiness_timeout, Duration::from_millis(250));
        assert_eq!(config.shutdown_grace, Duration::from_secs(DEFAULT_SHUTDOWN_GRACE_SECS));
    }

    #[test]
    fn debug_redacts_connection_string() {
        let config =
            Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://admin:hunter2@db/users")]))
                .unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
