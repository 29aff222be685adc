use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ticketdesk_core::{
    load_config, load_default_config, validate_config, Config, MemoryTicketStore, TicketStore,
};
use ticketdesk_server::{api::create_router, metrics, state::AppState};

/// Config file used when `TICKETDESK_CONFIG` is not set.
const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_configuration()?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");

    // Create the in-memory ticket store
    let ticket_store = Arc::new(MemoryTicketStore::new());
    if config.store.seed_examples && ticket_store.seed_if_empty() {
        info!("Seeded {} example tickets", ticket_store.len());
    }
    metrics::TICKETS_STORED.set(i64::try_from(ticket_store.len()).unwrap_or(i64::MAX));
    info!("Ticket store initialized");

    // Create app state and router
    let state = Arc::new(AppState::new(config, ticket_store));
    let server_config = &state.config().server;
    let addr = SocketAddr::new(server_config.host, server_config.port);
    let app = create_router(Arc::clone(&state));

    // Start server
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Resolve the configuration source: an explicit `TICKETDESK_CONFIG` path
/// must exist; otherwise `config.toml` is used when present, and defaults
/// plus environment overrides when it is not.
fn load_configuration() -> Result<Config> {
    let explicit = std::env::var("TICKETDESK_CONFIG").ok().map(PathBuf::from);

    let config = match explicit {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(&path)
                .with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            info!("Loading configuration from {}", DEFAULT_CONFIG_FILE);
            load_config(Path::new(DEFAULT_CONFIG_FILE))
                .with_context(|| format!("Failed to load config from {}", DEFAULT_CONFIG_FILE))?
        }
        None => {
            info!("No config file, using defaults and environment");
            load_default_config().context("Failed to load configuration")?
        }
    };

    Ok(config)
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
