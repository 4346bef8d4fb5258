//! # CLI Server
//!
//! Server startup and shutdown for the `serve` subcommand: connect to the
//! database, run pending migrations, wire the assignment service into the
//! router and serve until a shutdown signal arrives.

use std::{future::IntoFuture as _, net::SocketAddr, time::Duration};

use anyhow::anyhow;
use axum::Router;
use error::Result;
use migration::{Migrator, MigratorTrait as _};
use server::{create_app_router, AppState};
use service::AssignmentService;
use storage::PgTxManager;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::{
    commands::ServeArgs,
    config::{build_database_url, parse_socket_addr, DatabaseConfig},
};

/// Starts the API server
pub async fn serve(config: &DatabaseConfig, args: &ServeArgs) -> Result<()> {
    info!(target: "serve", "Starting API server...");

    let database_url = build_database_url(config);

    info!(target: "serve", "Connecting to database...");
    let db = migration::connect_to_database(&database_url)
        .await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

    info!(target: "serve", "Running database migrations...");
    Migrator::up(&db, None)
        .await
        .map_err(|e| anyhow!("Failed to run database migrations: {}", e))?;
    info!(target: "serve", "Database migrations completed successfully");

    let state = AppState::new(AssignmentService::new(PgTxManager::new(db)));
    let app = create_app_router(state, Duration::from_secs(args.request_timeout));

    let address = parse_socket_addr(&args.host, args.port)
        .map_err(|e| anyhow!("Invalid address {}:{}: {}", args.host, args.port, e))?;

    serve_http(app, address, Duration::from_secs(args.idle_timeout)).await
}

/// Serves the application over HTTP, draining in-flight requests for at
/// most `drain_grace` after a shutdown signal.
async fn serve_http(app: Router, address: SocketAddr, drain_grace: Duration) -> Result<()> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| anyhow!("Failed to bind to {}: {}", address, e))?;

    info!(target: "serve", %address, "Starting HTTP server...");

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let graceful = {
        let mut rx = shutdown_rx.clone();
        async move {
            let _ = rx.wait_for(|fired| *fired).await;
            info!(target: "serve", "Shutdown signal received, draining in-flight requests...");
        }
    };

    let server = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(graceful)
        .into_future();
    tokio::pin!(server);

    let mut drain_rx = shutdown_rx;
    tokio::select! {
        result = &mut server => {
            result.map_err(|e| anyhow!("HTTP server error: {}", e))?;
            info!(target: "serve", "Server stopped");
            Ok(())
        },
        () = async {
            let _ = drain_rx.wait_for(|fired| *fired).await;
            tokio::time::sleep(drain_grace).await;
        } => {
            warn!(target: "serve", "Drain grace period elapsed, aborting remaining requests");
            Ok(())
        },
    }
}

/// Resolves when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        _ = terminate => {},
    }
}
