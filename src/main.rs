//! planets-api server binary

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use planets_api::api::{create_router, AppState};
use planets_api::catalog::{FilmCatalog, SwapiClient};
use planets_api::config::{AppConfig, LogFormat};
use planets_api::repository::{DocumentRepository, PlanetRepository};
use planets_api::storage::{create_storage, StorageBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config)?;

    let storage_config = config
        .storage_runtime()
        .context("invalid storage configuration")?;
    let storage_backend = create_storage(storage_config).await?;
    let storage: Arc<dyn StorageBackend> = Arc::from(storage_backend);

    let repository: Arc<dyn PlanetRepository> = Arc::new(DocumentRepository::new(storage));

    let catalog_config = config
        .catalog_runtime()
        .context("invalid catalog configuration")?;
    tracing::info!(
        base_url = %catalog_config.base_url,
        timeout_secs = catalog_config.timeout.as_secs(),
        "Film catalog configured",
    );
    let catalog: Arc<dyn FilmCatalog> =
        Arc::new(SwapiClient::new(catalog_config).context("failed to build catalog client")?);

    let router = create_router(AppState::new(repository, catalog));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, "Listening for HTTP traffic");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.logging.level.clone()))
        .unwrap_or_else(|_| EnvFilter::new("planets_api=info,tower_http=info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format {
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }

    Ok(())
}
