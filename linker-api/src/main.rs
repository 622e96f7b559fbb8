//! Linker API Server Entry Point
//!
//! Reads configuration, applies the schema, and serves the router until
//! Ctrl-C.

use std::sync::Arc;

use linker_api::telemetry::{init_tracer, TelemetryConfig};
use linker_api::{create_api_router, ApiConfig, ApiError, ApiResult, DbClient, DbConfig};
use linker_core::CatalogStore;

#[tokio::main]
async fn main() -> ApiResult<()> {
    let telemetry_config = TelemetryConfig::default();
    init_tracer(&telemetry_config)?;

    let api_config = ApiConfig::from_env()?;
    let db_config = DbConfig::from_env();
    tracing::info!(
        host = %db_config.host,
        port = db_config.port,
        dbname = %db_config.dbname,
        pool_size = db_config.max_size,
        "Connecting to PostgreSQL"
    );
    let db = DbClient::from_config(&db_config)?;

    if db_config.migrate {
        db.migrate().await?;
    }

    let store: Arc<dyn CatalogStore> = Arc::new(db);
    let app = create_api_router(store, &api_config);

    let addr = api_config.bind_addr()?;
    tracing::info!(%addr, environment = %api_config.environment, "Starting Linker API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
