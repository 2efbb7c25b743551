//! Dog API - CRUD service for a single table of dogs
//!
//! Exposes list, fetch, create, update and delete over HTTP/JSON, backed by
//! PostgreSQL. Handlers reach the database only through the [`db::DogStore`]
//! port carried in the application state.

mod config;
mod db;
mod error;
mod models;
mod routes;
mod state;
mod validation;

use crate::config::Settings;
use crate::db::PgDogStore;
use crate::routes::create_router;
use crate::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Dog API...");

    let settings = Settings::load()?;
    info!("Configuration loaded successfully");

    let pool = match db::create_pool(&settings.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("FATAL: Failed to initialize database pool: {}", e);
            error!("DATABASE_URL (or DB_* variables) must point at a reachable database");
            return Err(e);
        }
    };
    db::ensure_schema(&pool).await?;

    let state = Arc::new(AppState::new(PgDogStore::new(pool)));
    let app = create_router(state, &settings);

    let addr = SocketAddr::from((settings.server.host, settings.server.port));

    info!("Server ready at http://{}", addr);
    info!("API Endpoints:");
    info!("   GET    /            - Hello world");
    info!("   GET    /health      - Health check");
    info!("   GET    /dogs        - List all dogs");
    info!("   POST   /dogs        - Create a dog");
    info!("   GET    /dogs/:id    - Get a dog");
    info!("   PATCH  /dogs/:id    - Update a dog");
    info!("   DELETE /dogs/:id    - Delete a dog");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing with structured logging
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dog_api=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
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
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        },
    }
}
