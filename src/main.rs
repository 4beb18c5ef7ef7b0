//! Contacts Broker - a cached contact directory service
//!
//! Serves contact lookups over HTTP, caching bulk directory snapshots so
//! repeated queries avoid re-enumerating the external directory.

mod api;
mod cache;
mod config;
mod directory;
mod error;
mod models;
mod service;
mod tasks;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use directory::ScriptDirectory;
use service::ContactService;

/// Main entry point for the contacts broker.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Construct the directory bridge and the cache-aware service
///    (which starts the background sweeper when caching is enabled)
/// 4. Create Axum router with all endpoints
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contacts_broker=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Contacts Broker");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, bridge={}, cache_enabled={}, ttl_ms={}, \
         max_memory_mb={}, max_entries={}, cleanup_interval_ms={}",
        config.server_port,
        config.bridge_command,
        config.cache.enabled,
        config.cache.ttl_ms,
        config.cache.max_memory_mb,
        config.cache.max_entries,
        config.cache.cleanup_interval_ms
    );

    // Construct the bridge and the cache-aware service
    let bridge = Arc::new(ScriptDirectory::new(config.bridge_command.clone()));
    let state = AppState::new(ContactService::new(bridge, config.cache.clone()));
    let service = state.service.clone();
    info!("Contact service initialized");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(service))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, tears down the contact service (stopping its
/// sweeper) and allows graceful shutdown.
async fn shutdown_signal(service: Arc<ContactService>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    service.shutdown().await;
}
