use std::{collections::HashMap, path::Path};

use crate::{
    error::{AppError, AppResult},
    models::CatalogEntry,
};

pub mod loader;

pub use loader::CatalogRow;

/// Read-only catalog and similarity table, loaded once at startup
///
/// Row and column `i` of the similarity table describe catalog entry `i`.
/// Construction fails unless the table is square and its dimension equals
/// the catalog size.
#[derive(Debug)]
pub struct DataStore {
    entries: Vec<CatalogEntry>,
    similarity: Vec<Vec<f32>>,
    by_title: HashMap<String, usize>,
}

impl DataStore {
    /// Builds a store from catalog rows and a similarity matrix
    pub fn new(rows: Vec<CatalogRow>, similarity: Vec<Vec<f32>>) -> AppResult<Self> {
        if similarity.len() != rows.len() {
            return Err(AppError::DataLoad(format!(
                "Similarity matrix has {} rows but catalog has {} entries",
                similarity.len(),
                rows.len()
            )));
        }

        if let Some((row, values)) = similarity
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != rows.len())
        {
            return Err(AppError::DataLoad(format!(
                "Similarity matrix row {} has {} columns, expected {}",
                row,
                values.len(),
                rows.len()
            )));
        }

        let entries: Vec<CatalogEntry> = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| CatalogEntry::new(index, row.title, row.movie_id))
            .collect();

        // First occurrence wins for duplicate titles
        let mut by_title = HashMap::with_capacity(entries.len());
        for entry in &entries {
            by_title.entry(entry.title.clone()).or_insert(entry.index);
        }

        if by_title.len() != entries.len() {
            tracing::warn!(
                duplicates = entries.len() - by_title.len(),
                "Catalog contains duplicate titles; lookups resolve to the first occurrence"
            );
        }

        Ok(Self {
            entries,
            similarity,
            by_title,
        })
    }

    /// Loads and validates both artifacts
    pub fn load(catalog_path: impl AsRef<Path>, similarity_path: impl AsRef<Path>) -> AppResult<Self> {
        let rows = loader::read_catalog(catalog_path.as_ref())?;
        let similarity = loader::read_similarity(similarity_path.as_ref())?;
        let store = Self::new(rows, similarity)?;

        tracing::info!(
            catalog_size = store.len(),
            catalog = %catalog_path.as_ref().display(),
            similarity = %similarity_path.as_ref().display(),
            "Loaded catalog and similarity table"
        );

        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in index order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    /// Exact, case-sensitive title match
    pub fn find_by_title(&self, title: &str) -> Option<&CatalogEntry> {
        self.by_title.get(title).and_then(|&i| self.entries.get(i))
    }

    /// Similarity scores of entry `index` against every entry, in index order
    pub fn similarity_row(&self, index: usize) -> Option<&[f32]> {
        self.similarity.get(index).map(Vec::as_slice)
    }
}
