use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

pub mod catalog;

pub use catalog::CatalogEntry;

/// Title shown when the API response has none
pub const UNKNOWN_TITLE: &str = "N/A";

/// Overview shown when the API response has none
pub const NO_OVERVIEW: &str = "No overview available";

/// A movie as rendered to the client, built per request from a TMDB response
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DisplayRecord {
    /// TMDB movie id
    pub id: Option<u64>,
    pub title: String,
    pub poster_url: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<NaiveDate>,
    pub rating: Option<f64>,
}

/// How poster paths are turned into URLs
#[derive(Debug, Clone)]
pub struct PosterConfig {
    pub image_base_url: String,
    pub placeholder_url: Option<String>,
}

impl PosterConfig {
    pub fn new(image_base_url: impl Into<String>, placeholder_url: impl Into<String>) -> Self {
        Self {
            image_base_url: image_base_url.into(),
            placeholder_url: Some(placeholder_url.into()),
        }
    }

    /// Builds the poster URL, falling back to the placeholder for absent or blank paths
    pub fn poster_url(&self, poster_path: Option<&str>) -> Option<String> {
        match poster_path.map(str::trim).filter(|p| !p.is_empty()) {
            Some(path) => Some(format!(
                "{}/{}",
                self.image_base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )),
            None => self.placeholder_url.clone(),
        }
    }
}

impl DisplayRecord {
    pub fn from_tmdb(movie: TmdbMovie, posters: &PosterConfig) -> Self {
        Self {
            id: movie.id,
            title: movie
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            poster_url: posters.poster_url(movie.poster_path.as_deref()),
            overview: movie.overview.filter(|o| !o.is_empty()),
            release_date: movie.release_date,
            rating: movie.vote_average,
        }
    }

    /// Record shown for a catalog movie whose details could not be fetched
    pub fn placeholder(source_id: u64, title: &str, posters: &PosterConfig) -> Self {
        Self {
            id: Some(source_id),
            title: title.to_string(),
            poster_url: posters.placeholder_url.clone(),
            overview: None,
            release_date: None,
            rating: None,
        }
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// A movie as returned by TMDB list, search and details endpoints
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbMovie {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

/// Paged list response from TMDB
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TmdbPage {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

/// TMDB sends "" for unknown release dates
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()))
}
