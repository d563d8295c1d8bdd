//! Reading the precomputed catalog and similarity artifacts from disk.

use serde::Deserialize;
use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use crate::error::{AppError, AppResult};

/// One catalog row as stored in the artifact
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogRow {
    pub movie_id: u64,
    pub title: String,
}

impl CatalogRow {
    pub fn new(movie_id: u64, title: impl Into<String>) -> Self {
        Self {
            movie_id,
            title: title.into(),
        }
    }
}

/// Accepted catalog layouts
///
/// `Columns` is the shape of a data frame exported with `to_dict()`:
/// one map per column, keyed by row position.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Records(Vec<CatalogRow>),
    Columns {
        movie_id: BTreeMap<String, u64>,
        title: BTreeMap<String, String>,
    },
}

impl CatalogFile {
    fn into_rows(self) -> AppResult<Vec<CatalogRow>> {
        match self {
            CatalogFile::Records(rows) => Ok(rows),
            CatalogFile::Columns { movie_id, title } => {
                let ids = positional("movie_id", movie_id)?;
                let titles = positional("title", title)?;

                if ids.len() != titles.len() {
                    return Err(AppError::DataLoad(format!(
                        "Catalog columns differ in length: movie_id has {}, title has {}",
                        ids.len(),
                        titles.len()
                    )));
                }

                Ok(ids
                    .into_iter()
                    .zip(titles)
                    .map(|(movie_id, title)| CatalogRow { movie_id, title })
                    .collect())
            }
        }
    }
}

/// Orders a column by its numeric row keys, which must be exactly `0..n`
fn positional<T>(column: &str, values: BTreeMap<String, T>) -> AppResult<Vec<T>> {
    let mut by_position = BTreeMap::new();
    for (key, value) in values {
        let position: usize = key.parse().map_err(|_| {
            AppError::DataLoad(format!(
                "Catalog column '{}' has non-numeric row key '{}'",
                column, key
            ))
        })?;
        if by_position.insert(position, value).is_some() {
            return Err(AppError::DataLoad(format!(
                "Catalog column '{}' repeats row {}",
                column, position
            )));
        }
    }

    for (expected, position) in by_position.keys().enumerate() {
        if *position != expected {
            return Err(AppError::DataLoad(format!(
                "Catalog column '{}' is missing row {}",
                column, expected
            )));
        }
    }

    Ok(by_position.into_values().collect())
}

fn open(path: &Path) -> AppResult<BufReader<File>> {
    File::open(path).map(BufReader::new).map_err(|e| {
        AppError::DataLoad(format!("Cannot open {}: {}", path.display(), e))
    })
}

/// Reads the catalog file in either record or column layout
pub fn read_catalog(path: &Path) -> AppResult<Vec<CatalogRow>> {
    let file: CatalogFile = serde_json::from_reader(open(path)?).map_err(|e| {
        AppError::DataLoad(format!("Invalid catalog {}: {}", path.display(), e))
    })?;
    file.into_rows()
}

/// Reads the similarity matrix as a list of rows
pub fn read_similarity(path: &Path) -> AppResult<Vec<Vec<f32>>> {
    serde_json::from_reader(open(path)?).map_err(|e| {
        AppError::DataLoad(format!(
            "Invalid similarity matrix {}: {}",
            path.display(),
            e
        ))
    })
}
