use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use movie_recommender::{
    config::Config,
    routes::{create_router, AppState},
    services::TmdbProvider,
    store::DataStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_recommender=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Without its data the service cannot answer anything, so fail before binding
    let store = DataStore::load(&config.catalog_path, &config.similarity_path)
        .context("Failed to load recommendation data")?;

    let provider = TmdbProvider::from_config(&config)?;
    let posters = provider.posters().clone();
    let state = AppState::new(Arc::new(store), Arc::new(provider), posters)?;

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
