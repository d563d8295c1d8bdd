//! TMDB (The Movie Database) API provider
//!
//! API Flow:
//! 1. Lists: /trending/movie/week and /movie/top_rated → paged `results`
//! 2. Search: /search/movie?query= → paged `results`
//! 3. Details: /movie/{id} → single movie with overview
//!
//! The API key travels as the `api_key` query parameter on every request.

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{DisplayRecord, PosterConfig, TmdbMovie, TmdbPage},
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use std::time::Duration;

const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    posters: PosterConfig,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, posters: PosterConfig) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            posters,
        }
    }

    /// Creates a provider from application configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let mut builder = HttpClient::builder();
        if let Some(secs) = config.tmdb_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key: config.tmdb_api_key.clone(),
            api_url: config.tmdb_api_url.clone(),
            posters: PosterConfig::new(
                config.tmdb_image_url.clone(),
                config.placeholder_poster_url.clone(),
            ),
        })
    }

    /// Poster settings used when building display records
    pub fn posters(&self) -> &PosterConfig {
        &self.posters
    }

    /// Issues a GET against the API and decodes the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url.trim_end_matches('/'), path);
        tracing::debug!(url = %url, "TMDB request");

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::RemoteFetch {
                status: Some(status.as_u16()),
                message: format!("TMDB API returned status {}: {}", status, body),
            });
        }

        response.json::<T>().await.map_err(|e| {
            AppError::remote(format!("Invalid TMDB response for {}: {}", path, e))
        })
    }

    async fn fetch_list(&self, path: &str, params: &[(&str, &str)]) -> AppResult<Vec<DisplayRecord>> {
        let page: TmdbPage = self.get_json(path, params).await?;
        Ok(page
            .results
            .into_iter()
            .map(|movie| DisplayRecord::from_tmdb(movie, &self.posters))
            .collect())
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch_trending(&self) -> AppResult<Vec<DisplayRecord>> {
        let movies = self.fetch_list("/trending/movie/week", &[]).await?;

        tracing::info!(
            results = movies.len(),
            provider = self.name(),
            "Trending fetch completed"
        );

        Ok(movies)
    }

    async fn fetch_top_rated(&self) -> AppResult<Vec<DisplayRecord>> {
        let movies = self
            .fetch_list("/movie/top_rated", &[("language", LANGUAGE), ("page", "1")])
            .await?;

        tracing::info!(
            results = movies.len(),
            provider = self.name(),
            "Top rated fetch completed"
        );

        Ok(movies)
    }

    async fn search(&self, query: &str) -> AppResult<Vec<DisplayRecord>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let movies = self
            .fetch_list("/search/movie", &[("language", LANGUAGE), ("query", query)])
            .await?;

        tracing::info!(
            query = %query,
            results = movies.len(),
            provider = self.name(),
            "Movie search completed"
        );

        Ok(movies)
    }

    async fn fetch_details(&self, source_id: u64) -> AppResult<DisplayRecord> {
        let path = format!("/movie/{}", source_id);
        let movie: TmdbMovie = self.get_json(&path, &[("language", LANGUAGE)]).await?;

        let mut record = DisplayRecord::from_tmdb(movie, &self.posters);
        record.id.get_or_insert(source_id);
        Ok(record)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_provider(api_url: &str) -> TmdbProvider {
        TmdbProvider::new(
            "test-key".to_string(),
            api_url.to_string(),
            PosterConfig::new("https://image.tmdb.org/t/p/w500", "https://example.com/none.png"),
        )
    }

    #[tokio::test]
    async fn test_blank_search_is_invalid_input() {
        // Nothing listens on port 1, so a request would surface as RemoteFetch
        let provider = create_test_provider("http://127.0.0.1:1");
        let result = provider.search("   ").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_connection_failure_is_remote_fetch() {
        let provider = create_test_provider("http://127.0.0.1:1");
        let result = provider.fetch_trending().await;
        assert!(matches!(
            result,
            Err(AppError::RemoteFetch { status: None, .. })
        ));
    }

    #[test]
    fn test_from_config_uses_configured_posters() {
        let config: Config = envy::from_iter(vec![
            ("TMDB_API_KEY".to_string(), "k".to_string()),
            ("TMDB_IMAGE_URL".to_string(), "https://img.example/w342".to_string()),
            ("TMDB_TIMEOUT_SECS".to_string(), "5".to_string()),
        ])
        .unwrap();

        let provider = TmdbProvider::from_config(&config).unwrap();
        assert_eq!(provider.posters().image_base_url, "https://img.example/w342");
        assert_eq!(
            provider.posters().poster_url(Some("/p.jpg")).as_deref(),
            Some("https://img.example/w342/p.jpg")
        );
        assert_eq!(provider.name(), "tmdb");
    }
}
