use anyhow::Result;
use common::config::CatalogConfig;
use common::telemetry::{init_telemetry, shutdown_telemetry, TelemetryConfig};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;

mod handlers;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Loads .env as a side effect
    let config = CatalogConfig::from_env();

    let telemetry_config = TelemetryConfig::from_env("catalog-service");
    let enable_jaeger = telemetry_config.enable_jaeger;
    init_telemetry(telemetry_config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!("Starting catalog service...");
    tracing::info!("Distributed tracing: {}", if enable_jaeger { "enabled" } else { "disabled" });

    tracing::info!("Configuration:");
    tracing::info!("  Cache backend: {:?}", config.cache.backend);
    tracing::info!("  Cache TTL: {} seconds", config.cache.ttl_seconds);
    tracing::info!("  Kafka brokers: {}", config.messaging.brokers);
    tracing::info!("  Image topic: {}", config.messaging.image_topic);
    tracing::info!("  Port: {}", config.port);

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!("Database connected");

    let state = AppState::new(&config, pool.clone()).await?;
    let app = routes::create_router(state, config.request_timeout());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Catalog service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            tracing::error!("Server error: {}", e);
            e
        })?;

    tracing::info!("Closing database pool...");
    pool.close().await;
    shutdown_telemetry();
    tracing::info!("Catalog service stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Received shutdown signal, shutting down gracefully...");
}
