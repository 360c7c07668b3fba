//! # Bookery API
//!
//! REST backend for the Bookery storefront.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Bookery API Server                              │
//! │                                                                         │
//! │  Mobile app ───► HTTP (4444) ───► axum handlers ───► bookery-db        │
//! │                                        │                  │             │
//! │                                        ▼                  ▼             │
//! │                                  bookery-core          SQLite           │
//! │                                  (validation,          (WAL)            │
//! │                                   money, types)                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod auth;
mod config;
mod envelope;
mod error;
mod routes;
mod state;

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use bookery_db::{Database, DbConfig};

use crate::config::ApiConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Bookery API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        port = config.port,
        database = %config.database_path,
        "Configuration loaded"
    );

    // Connect to database (runs migrations on open)
    let db_config = DbConfig::new(&config.database_path)
        .max_connections(config.max_db_connections);
    let db = Database::new(db_config).await?;
    info!("Connected to SQLite, migrations applied");

    // Build router with shared state
    let state = AppState::new(db);
    let app = routes::router(state);

    let addr: SocketAddr = format!("{}:{}", config.bind_addr, config.port).parse()?;
    info!(%addr, "Starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
