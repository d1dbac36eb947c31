//! Process lifecycle: serve until told to stop, then drain within a bound.
//!
//! Phases run `Starting -> Serving -> Draining -> Stopped`. The listener runs
//! on its own task; the caller's shutdown future decides when draining
//! begins, and the grace period decides how long in-flight requests get.

use std::future::Future;
use std::io;
use std::time::Duration;

use axum::{body::Body, extract::Request, Router};
use hyper::body::Incoming;
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto::Builder,
    service::TowerToHyperService,
};
use tokio::net::TcpListener;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Pool built, listener being bound
    Starting,
    /// Accepting and handling requests
    Serving,
    /// No longer accepting; in-flight requests finishing
    Draining,
    /// Listener gone, pool closed
    Stopped,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Starting => write!(f, "starting"),
            Phase::Serving => write!(f, "serving"),
            Phase::Draining => write!(f, "draining"),
            Phase::Stopped => write!(f, "stopped"),
        }
    }
}

impl Phase {
    /// Record a transition into this phase.
    pub fn enter(self) -> Self {
        tracing::info!(phase = %self, "Lifecycle phase");
        self
    }
}

/// How draining ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Every in-flight request finished inside the grace period
    Completed,
    /// The grace period elapsed and the remaining connections were aborted
    Forced,
}

/// Serve `app` on `listener` until `shutdown` resolves, then drain.
///
/// After `shutdown` resolves the listener stops accepting and in-flight
/// requests get `grace` to finish. Past that, every connection task is
/// aborted, dropping its handler mid-flight, and the outcome is `Forced`.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    grace: Duration,
) -> io::Result<DrainOutcome>
where
    F: Future<Output = ()> + Send,
{
    let token = CancellationToken::new();

    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "Listening");
    }
    Phase::Serving.enter();

    let mut server = tokio::spawn(accept_loop(listener, app, token.clone()));

    tokio::select! {
        _ = shutdown => {}
        finished = &mut server => {
            // The accept loop only ends on its own if it panicked.
            return match finished {
                Ok(()) => Ok(DrainOutcome::Completed),
                Err(join_err) => Err(io::Error::new(io::ErrorKind::Other, join_err)),
            };
        }
    }

    Phase::Draining.enter();
    token.cancel();

    match tokio::time::timeout(grace, &mut server).await {
        Ok(Ok(())) => {
            tracing::info!("In-flight requests drained");
            Ok(DrainOutcome::Completed)
        }
        Ok(Err(join_err)) => Err(io::Error::new(io::ErrorKind::Other, join_err)),
        Err(_) => {
            tracing::warn!(
                grace_secs = grace.as_secs_f64(),
                "Drain exceeded grace period, aborting in-flight requests"
            );
            // Dropping the accept loop drops its JoinSet, which aborts every
            // connection task.
            server.abort();
            let _ = server.await;
            Ok(DrainOutcome::Forced)
        }
    }
}

/// Accept connections until `drain` fires, then wait for open ones to finish.
///
/// Connection tasks live in a `JoinSet` owned by this future so that
/// aborting it tears down every connection with it.
async fn accept_loop(listener: TcpListener, app: Router, drain: CancellationToken) {
    let mut connections = JoinSet::new();

    loop {
        let stream = tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, _)) => stream,
                Err(e) => {
                    if !is_connection_error(&e) {
                        tracing::error!("Accept failed: {}", e);
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                    continue;
                }
            },
            Some(_) = connections.join_next(), if !connections.is_empty() => continue,
            _ = drain.cancelled() => break,
        };

        let service = TowerToHyperService::new(
            app.clone()
                .map_request(|request: Request<Incoming>| request.map(Body::new)),
        );
        let drain = drain.clone();

        connections.spawn(async move {
            let builder = Builder::new(TokioExecutor::new());
            let conn = builder.serve_connection_with_upgrades(TokioIo::new(stream), service);
            tokio::pin!(conn);

            let result = tokio::select! {
                result = conn.as_mut() => result,
                _ = drain.cancelled() => {
                    conn.as_mut().graceful_shutdown();
                    conn.as_mut().await
                }
            };

            if let Err(e) = result {
                tracing::debug!("Connection closed with error: {}", e);
            }
        });
    }

    drop(listener);
    tracing::debug!(open = connections.len(), "Stopped accepting connections");

    while connections.join_next().await.is_some() {}
}

fn is_connection_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionRefused
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
    )
}

/// Wait for SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
