use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use stylist_api::api::{create_router, AppState};
use stylist_api::config::Config;
use stylist_api::services::{CatalogProvider, InMemoryCatalog};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "stylist_api=info,tower_http=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let catalog: Arc<dyn CatalogProvider> = match &config.catalog_path {
        Some(path) => Arc::new(InMemoryCatalog::from_json_file(path).await?),
        None => {
            tracing::warn!("CATALOG_PATH not set, starting with an empty catalog");
            Arc::new(InMemoryCatalog::default())
        }
    };

    let state = AppState::with_catalog(catalog, config.recommendation_settings());
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
