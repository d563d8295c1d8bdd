//! Movie metadata provider abstraction
//!
//! The rest of the application talks to the metadata API only through
//! this trait, so handlers and the recommendation service can be exercised
//! against a mock instead of the live TMDB service.

use crate::{error::AppResult, models::DisplayRecord};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
///
/// Every method performs outbound I/O only and leaves no local state behind.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Movies trending over the past week
    async fn fetch_trending(&self) -> AppResult<Vec<DisplayRecord>>;

    /// Highest-rated movies, first page
    async fn fetch_top_rated(&self) -> AppResult<Vec<DisplayRecord>>;

    /// Search movies by title
    ///
    /// Blank queries are rejected with `InvalidInput` before any request is made.
    async fn search(&self, query: &str) -> AppResult<Vec<DisplayRecord>>;

    /// Full details (including overview) for a single movie
    async fn fetch_details(&self, source_id: u64) -> AppResult<DisplayRecord>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
