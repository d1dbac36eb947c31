//! Serve command - Starts the HTTP server and owns its lifecycle.

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;
use crate::lifecycle::{self, DrainOutcome, Phase};

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> AppResult<()> {
    Phase::Starting.enter();
    tracing::debug!(?config, "Configuration loaded");

    // Unreachable store at startup is fatal, no retry
    let database = Database::connect(&config.database)
        .await
        .map_err(|e| AppError::connectivity(format!("Failed to reach database: {}", e)))?;

    let app_state = AppState::from_database(&database, &config);
    let app = create_router(app_state, config.request_timeout);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    let outcome = lifecycle::serve(
        listener,
        app,
        lifecycle::shutdown_signal(),
        config.shutdown_grace,
    )
    .await
    .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    if outcome == DrainOutcome::Forced {
        tracing::warn!("Some requests were still in flight at shutdown");
    }

    // The pool goes last, after the listener is gone.
    match tokio::time::timeout(config.shutdown_grace, database.close()).await {
        Ok(Ok(())) => tracing::debug!("Database pool closed"),
        Ok(Err(e)) => tracing::error!("Failed to close database pool: {}", e),
        Err(_) => tracing::warn!("Timed out closing database pool"),
    }

    Phase::Stopped.enter();
    Ok(())
}
