use serde::{Deserialize, Serialize};

/// A movie known to the local catalog
///
/// `index` is the row position in the catalog file and addresses the
/// matching row and column of the similarity table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    pub index: usize,
    pub title: String,
    /// TMDB movie id
    pub source_id: u64,
}

impl CatalogEntry {
    pub fn new(index: usize, title: impl Into<String>, source_id: u64) -> Self {
        Self {
            index,
            title: title.into(),
            source_id,
        }
    }
}
