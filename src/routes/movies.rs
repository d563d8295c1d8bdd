use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult, middleware::request_id::RequestId, models::DisplayRecord, routes::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

/// Handler for weekly trending movies
pub async fn trending(State(state): State<AppState>) -> AppResult<Json<Vec<DisplayRecord>>> {
    let movies = state.provider.fetch_trending().await?;
    Ok(Json(movies))
}

/// Handler for top-rated movies
pub async fn top_rated(State(state): State<AppState>) -> AppResult<Json<Vec<DisplayRecord>>> {
    let movies = state.provider.fetch_top_rated().await?;
    Ok(Json(movies))
}

/// Handler for movie search endpoint
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<DisplayRecord>>> {
    tracing::info!(
        request_id = %request_id,
        query = %params.q,
        "Processing search request"
    );

    let movies = state.provider.search(&params.q).await?;
    Ok(Json(movies))
}

/// Handler for single movie details
pub async fn details(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> AppResult<Json<DisplayRecord>> {
    let movie = state.provider.fetch_details(id).await?;
    Ok(Json(movie))
}
