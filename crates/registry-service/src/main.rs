//! Registry Service
//!
//! Entry point: loads configuration, connects the write and read pools,
//! bootstraps the schema and serves HTTP until a shutdown signal arrives.

use registry_service::config::Config;
use registry_service::observability::metrics::init_metrics_recorder;
use registry_service::routes::{self, AppState};
use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "registry_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Registry Service");

    // Load configuration
    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!(
        version = %config.version,
        environment = %config.environment,
        bind_address = %config.bind_address,
        fault_mode = config.fault_mode,
        readiness_timeout_ms = config.readiness_timeout_ms,
        admin_endpoints_enabled = config.admin_endpoints_enabled,
        "Configuration loaded successfully"
    );

    let write_pool = connect_pool(&config.write_database_url, "write").await?;
    let read_pool = connect_pool(&config.read_database_url, "read").await?;

    // Schema bootstrap runs against the primary only
    info!("Running migrations on write database...");
    sqlx::migrate!("../../migrations")
        .run(&write_pool)
        .await
        .map_err(|e| {
            error!("Failed to run migrations: {}", e);
            e
        })?;

    let metrics_handle = init_metrics_recorder().map_err(|e| {
        error!("Failed to initialize metrics: {}", e);
        e
    })?;

    let bind_address = config.bind_address.clone();
    let drain_seconds = config.drain_seconds;

    // Cancelled on SIGTERM/SIGINT so /ready flips before the drain period
    let shutdown = CancellationToken::new();

    let state = Arc::new(AppState::new(
        write_pool,
        read_pool,
        config,
        shutdown.clone(),
    ));

    let app = routes::build_routes(state, metrics_handle);

    let addr: SocketAddr = bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    info!("Registry Service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(shutdown, drain_seconds))
    .await?;

    info!("Registry Service shutdown complete");

    Ok(())
}

/// Connect one pool with a server-side statement timeout.
async fn connect_pool(url: &SecretString, role: &str) -> Result<PgPool, sqlx::Error> {
    info!(role, "Connecting to database...");
    let url_with_timeout = add_query_timeout(url.expose_secret(), 5);

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(&url_with_timeout)
        .await
        .map_err(|e| {
            error!(role, "Failed to connect to database: {}", e);
            e
        })?;

    info!(role, "Database connection established");
    Ok(pool)
}

/// Listens for shutdown signals (SIGTERM, SIGINT).
///
/// Cancels `shutdown` as soon as a signal arrives, then returns once the
/// drain period is complete.
async fn shutdown_signal(shutdown: CancellationToken, drain_secs: u64) {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received SIGINT, starting graceful shutdown..."),
            Err(e) => error!("Failed to listen for SIGINT: {}", e),
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM, starting graceful shutdown...");
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    shutdown.cancel();

    if drain_secs > 0 {
        warn!("Draining connections for {} seconds...", drain_secs);
        tokio::time::sleep(Duration::from_secs(drain_secs)).await;
        info!("Drain period complete");
    } else {
        info!("Skipping drain period (DRAIN_SECONDS=0)");
    }
}

/// Adds statement_timeout to the database URL.
/// This ensures queries don't hang indefinitely.
fn add_query_timeout(url: &str, timeout_secs: u32) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!(
        "{}{}options=-c%20statement_timeout%3D{}s",
        url, separator, timeout_secs
    )
}
