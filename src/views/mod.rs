//! Server-rendered HTML for the browser UI.
//!
//! Pages extend one layout with four tabs and render movie lists as a
//! poster grid. Templates are compiled once at startup; `.html` names get
//! minijinja's HTML auto-escaping.

use minijinja::{context, Environment};
use serde::Serialize;

use crate::{
    error::AppResult,
    models::{CatalogEntry, DisplayRecord, NO_OVERVIEW},
};

/// The four UI tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Recommendations,
    Search,
    Trending,
    TopRated,
}

impl Tab {
    pub fn path(self) -> &'static str {
        match self {
            Tab::Recommendations => "/recommend",
            Tab::Search => "/search",
            Tab::Trending => "/trending",
            Tab::TopRated => "/top-rated",
        }
    }
}

/// What a page shows below its heading and form
#[derive(Debug, Clone, Copy)]
pub enum Listing<'a> {
    /// Nothing requested yet
    Absent,
    Movies(&'a [DisplayRecord]),
    /// Empty-state message in place of the grid
    Notice(&'a str),
}

/// One grid card, with every field already formatted for display
#[derive(Debug, Serialize)]
struct MovieCard<'a> {
    /// Digits only, appended to the TMDB movie URL in the template
    tmdb_id: String,
    title: &'a str,
    poster_url: Option<&'a str>,
    release_date: Option<String>,
    rating: Option<String>,
    overview: &'a str,
}

impl<'a> From<&'a DisplayRecord> for MovieCard<'a> {
    fn from(movie: &'a DisplayRecord) -> Self {
        Self {
            tmdb_id: movie.id.map(|id| id.to_string()).unwrap_or_default(),
            title: &movie.title,
            poster_url: movie.poster_url.as_deref(),
            release_date: movie.release_date.map(|date| date.to_string()),
            rating: movie.rating.map(|rating| format!("{:.1}", rating)),
            overview: movie.overview.as_deref().unwrap_or(NO_OVERVIEW),
        }
    }
}

/// Compiled page templates
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    pub fn new() -> AppResult<Self> {
        let mut env = Environment::new();
        env.add_template("base.html", include_str!("templates/base.html"))?;
        env.add_template("grid.html", include_str!("templates/grid.html"))?;
        env.add_template("recommend.html", include_str!("templates/recommend.html"))?;
        env.add_template("search.html", include_str!("templates/search.html"))?;
        env.add_template("listing.html", include_str!("templates/listing.html"))?;
        Ok(Self { env })
    }

    /// Recommendations tab: select box over the whole catalog plus the Recommend button
    pub fn recommend_page(
        &self,
        entries: &[CatalogEntry],
        selected: Option<&str>,
        listing: Listing<'_>,
    ) -> AppResult<String> {
        let (movies, warning) = split(listing);
        let html = self.env.get_template("recommend.html")?.render(context! {
            active => Tab::Recommendations.path(),
            heading => "Get Movie Recommendations",
            entries,
            selected,
            movies,
            warning,
        })?;
        Ok(html)
    }

    pub fn search_page(&self, query: Option<&str>, listing: Listing<'_>) -> AppResult<String> {
        let (movies, warning) = split(listing);
        let html = self.env.get_template("search.html")?.render(context! {
            active => Tab::Search.path(),
            heading => "Search Movies from TMDB",
            query,
            movies,
            warning,
        })?;
        Ok(html)
    }

    /// A tab that only shows a grid, such as Trending or Top Rated
    pub fn listing_page(&self, tab: Tab, heading: &str, listing: Listing<'_>) -> AppResult<String> {
        let (movies, warning) = split(listing);
        let html = self.env.get_template("listing.html")?.render(context! {
            active => tab.path(),
            heading,
            movies,
            warning,
        })?;
        Ok(html)
    }
}

fn split(listing: Listing<'_>) -> (Option<Vec<MovieCard<'_>>>, Option<&str>) {
    match listing {
        Listing::Absent => (None, None),
        Listing::Movies(movies) => (Some(movies.iter().map(MovieCard::from).collect()), None),
        Listing::Notice(message) => (None, Some(message)),
    }
}
