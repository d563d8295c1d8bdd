use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{CatalogEntry, DisplayRecord},
    routes::AppState,
    services::recommendations,
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
}

/// Handler for the catalog listing
pub async fn catalog(State(state): State<AppState>) -> Json<Vec<CatalogEntry>> {
    Json(state.store.entries().to_vec())
}

/// Handler for recommendations endpoint
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<Vec<DisplayRecord>>> {
    tracing::info!(
        request_id = %request_id,
        title = %params.title,
        "Processing recommendation request"
    );

    let records = recommendations::recommend_with_details(
        &state.store,
        state.provider.as_ref(),
        &state.posters,
        &params.title,
    )
    .await?;

    Ok(Json(records))
}
