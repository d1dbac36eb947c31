//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default per-request deadline in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Lifecycle
// =============================================================================

/// Default time in-flight requests get to finish after a shutdown signal
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 5;

/// Default bound on the readiness connectivity probe in milliseconds
pub const DEFAULT_READINESS_TIMEOUT_MS: u64 = 1000;

// =============================================================================
// Database
// =============================================================================

/// Environment variable holding the store connection string
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Default maximum pooled connections
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default minimum idle pooled connections
pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;

/// Default connect/acquire timeout for the pool in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
