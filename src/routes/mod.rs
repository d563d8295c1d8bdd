use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    error::AppResult,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    models::PosterConfig,
    services::providers::MetadataProvider,
    store::DataStore,
    views::Views,
};

pub mod movies;
pub mod pages;
pub mod recommendations;

/// Shared, read-only application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DataStore>,
    pub provider: Arc<dyn MetadataProvider>,
    /// Used for placeholder cards when a details fetch fails
    pub posters: PosterConfig,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(
        store: Arc<DataStore>,
        provider: Arc<dyn MetadataProvider>,
        posters: PosterConfig,
    ) -> AppResult<Self> {
        Ok(Self {
            store,
            provider,
            posters,
            views: Arc::new(Views::new()?),
        })
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(page_routes())
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Browser UI
fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/recommend", get(pages::recommend))
        .route("/search", get(pages::search))
        .route("/trending", get(pages::trending))
        .route("/top-rated", get(pages::top_rated))
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(recommendations::catalog))
        .route("/recommendations", get(recommendations::recommend))
        .route("/movies/trending", get(movies::trending))
        .route("/movies/top-rated", get(movies::top_rated))
        .route("/movies/search", get(movies::search))
        .route("/movies/:id", get(movies::details))
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "healthy", "catalog_size": state.store.len() })),
    )
}
