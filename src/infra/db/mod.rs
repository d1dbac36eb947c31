//! Database connection pool and connectivity checks.
//!
//! The schema itself is applied by an external migration step before the
//! service receives traffic; this module only owns the pool.

use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement,
};

use crate::config::DatabaseConfig;

/// Anything the readiness probe can ping.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    /// Round-trip to the store; `Ok` means it answered.
    async fn ping(&self) -> Result<(), DbErr>;
}

/// Database wrapper for connection management
#[derive(Clone)]
pub struct Database {
    connection: Arc<DatabaseConnection>,
}

impl Database {
    /// Build the connection pool and verify the store answers once.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(config.connect_timeout)
            .acquire_timeout(config.connect_timeout)
            .sqlx_logging(false);

        let connection = SeaDatabase::connect(options).await?;
        let db = Self::from_connection(connection);
        db.ping().await?;

        tracing::info!(
            max_connections = config.max_connections,
            "Database pool connected"
        );

        Ok(db)
    }

    /// Wrap an existing connection (mock or already-built pool).
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self {
            connection: Arc::new(connection),
        }
    }

    /// Get a shared handle to the database connection.
    pub fn get_connection(&self) -> Arc<DatabaseConnection> {
        Arc::clone(&self.connection)
    }

    /// Check database connectivity by executing a simple query.
    pub async fn ping(&self) -> Result<(), DbErr> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }

    /// Close every pooled connection. Handles held elsewhere become unusable.
    pub async fn close(self) -> Result<(), DbErr> {
        self.connection.close_by_ref().await
    }
}

#[async_trait]
impl ConnectivityProbe for Database {
    async fn ping(&self) -> Result<(), DbErr> {
        Database::ping(self).await
    }
}
