//! HTML handlers. Lookup and fetch failures never surface as error statuses
//! here: each tab renders an empty-state message instead.

use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::DisplayRecord,
    routes::AppState,
    services::recommendations,
    views::{Listing, Tab},
};

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub async fn index() -> Redirect {
    Redirect::to(Tab::Recommendations.path())
}

/// Recommendations tab: catalog picker, and results once a title is chosen
pub async fn recommend(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> AppResult<Html<String>> {
    let selected = params.title.as_deref();

    let found = match selected {
        Some(title) => Some(
            recommendations::recommend_with_details(
                &state.store,
                state.provider.as_ref(),
                &state.posters,
                title,
            )
            .await,
        ),
        None => None,
    };

    let listing = match &found {
        Some(result) => non_empty(
            "recommend",
            result,
            "No recommendations found. Try another movie.",
        ),
        None => Listing::Absent,
    };

    let html = state
        .views
        .recommend_page(state.store.entries(), selected, listing)?;
    Ok(Html(html))
}

/// Search tab
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Html<String>> {
    let query = params.q.as_deref();

    let found = match query {
        Some(query) => Some(state.provider.search(query).await),
        None => None,
    };

    let listing = match &found {
        Some(result) => non_empty("search", result, "No results found. Try a different query."),
        None => Listing::Absent,
    };

    Ok(Html(state.views.search_page(query, listing)?))
}

/// Trending tab
pub async fn trending(State(state): State<AppState>) -> AppResult<Html<String>> {
    let result = state.provider.fetch_trending().await;
    let listing = non_empty(
        "trending",
        &result,
        "Could not fetch trending movies at the moment.",
    );

    let html = state
        .views
        .listing_page(Tab::Trending, "Trending Movies (This Week)", listing)?;
    Ok(Html(html))
}

/// Top rated tab
pub async fn top_rated(State(state): State<AppState>) -> AppResult<Html<String>> {
    let result = state.provider.fetch_top_rated().await;
    let listing = non_empty(
        "top_rated",
        &result,
        "Could not fetch top rated movies at the moment.",
    );

    let html = state
        .views
        .listing_page(Tab::TopRated, "Top Rated Movies", listing)?;
    Ok(Html(html))
}

/// Grid for a non-empty result, the empty-state message otherwise
fn non_empty<'a>(
    page: &'static str,
    result: &'a AppResult<Vec<DisplayRecord>>,
    message: &'a str,
) -> Listing<'a> {
    match result {
        Ok(movies) if !movies.is_empty() => Listing::Movies(movies),
        Ok(_) => Listing::Notice(message),
        Err(e) => {
            log_failure(page, e);
            Listing::Notice(message)
        }
    }
}

fn log_failure(page: &'static str, error: &AppError) {
    match error {
        AppError::NotFound(_) | AppError::InvalidInput(_) => {
            tracing::info!(page, error = %error, "Rendering empty state")
        }
        _ => tracing::warn!(page, error = %error, "Rendering empty state after failure"),
    }
}
