use std::{cmp::Ordering, collections::HashSet};

use crate::{
    error::{AppError, AppResult},
    models::{CatalogEntry, DisplayRecord, PosterConfig},
    services::providers::MetadataProvider,
    store::DataStore,
};

/// Number of titles returned per recommendation
pub const RECOMMENDATION_COUNT: usize = 5;

/// Finds the catalog entries most similar to `title`
///
/// Ranks every other entry by its score in the selected title's similarity
/// row, highest first. Equal scores keep ascending index order, and the
/// selected title itself is never returned even when its own score is the
/// row maximum. Entries sharing the selected title are skipped too, and a
/// title repeated in the catalog appears once, at its best rank, so the list
/// may be shorter than [`RECOMMENDATION_COUNT`]. Title matching is exact:
/// case and whitespace are significant.
pub fn recommend<'a>(store: &'a DataStore, title: &str) -> AppResult<Vec<&'a CatalogEntry>> {
    let selected = store
        .find_by_title(title)
        .ok_or_else(|| AppError::NotFound(format!("'{}' is not in the catalog", title)))?;

    let row = store.similarity_row(selected.index).ok_or_else(|| {
        AppError::Internal(format!("No similarity row for index {}", selected.index))
    })?;

    let mut ranked: Vec<(usize, f32)> = row.iter().copied().enumerate().collect();
    // Vec::sort_by is stable, so ties stay in index order
    ranked.sort_by(|a, b| by_score_descending(a.1, b.1));

    let mut seen: HashSet<&str> = HashSet::from([selected.title.as_str()]);
    Ok(ranked
        .into_iter()
        .filter_map(|(index, _)| store.get(index))
        .filter(|entry| seen.insert(entry.title.as_str()))
        .take(RECOMMENDATION_COUNT)
        .collect())
}

/// Descending order with NaN ranked below every number
fn by_score_descending(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// Recommends titles and fetches their display details
///
/// Details are fetched one at a time in ranking order. A movie whose details
/// cannot be fetched is still shown, as a placeholder card built from the
/// catalog entry.
pub async fn recommend_with_details(
    store: &DataStore,
    provider: &dyn MetadataProvider,
    posters: &PosterConfig,
    title: &str,
) -> AppResult<Vec<DisplayRecord>> {
    let entries = recommend(store, title)?;
    let mut records = Vec::with_capacity(entries.len());

    for entry in entries {
        match provider.fetch_details(entry.source_id).await {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    source_id = entry.source_id,
                    title = %entry.title,
                    provider = provider.name(),
                    "Details fetch failed, using placeholder"
                );
                records.push(DisplayRecord::placeholder(
                    entry.source_id,
                    &entry.title,
                    posters,
                ));
            }
        }
    }

    tracing::info!(
        title = %title,
        results = records.len(),
        "Recommendations completed"
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::MockMetadataProvider;
    use crate::store::CatalogRow;
    use mockall::predicate::eq;
    use tokio_test::{assert_err, assert_ok};

    fn store(titles: &[&str], similarity: Vec<Vec<f32>>) -> DataStore {
        let rows = titles
            .iter()
            .enumerate()
            .map(|(i, t)| CatalogRow::new(100 + i as u64, *t))
            .collect();
        DataStore::new(rows, similarity).unwrap()
    }

    /// Symmetric table where row i scores j as 1 / (1 + |i - j|)
    fn distance_store(n: usize) -> DataStore {
        let titles: Vec<String> = (0..n).map(|i| format!("Movie {}", i)).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let similarity: Vec<Vec<f32>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| 1.0 / (1.0 + (i as f32 - j as f32).abs()))
                    .collect()
            })
            .collect();
        store(&refs, similarity)
    }

    fn titles(entries: &[&CatalogEntry]) -> Vec<String> {
        entries.iter().map(|e| e.title.clone()).collect()
    }

    fn seven_titles() -> DataStore {
        let mut similarity = vec![vec![0.0; 7]; 7];
        similarity[0] = vec![1.0, 0.9, 0.9, 0.5, 0.3, 0.2, 0.1];
        store(&["A", "B", "C", "D", "E", "F", "G"], similarity)
    }

    #[test]
    fn test_end_to_end_tie_breaks_by_index() {
        let store = seven_titles();
        let result = recommend(&store, "A").unwrap();
        assert_eq!(titles(&result), vec!["B", "C", "D", "E", "F"]);
    }

    #[test]
    fn test_every_title_gets_five_distinct_others() {
        let store = distance_store(10);
        for entry in store.entries() {
            let result = recommend(&store, &entry.title).unwrap();
            assert_eq!(result.len(), RECOMMENDATION_COUNT);
            assert!(result.iter().all(|r| r.title != entry.title));

            let mut indices: Vec<usize> = result.iter().map(|r| r.index).collect();
            indices.sort_unstable();
            indices.dedup();
            assert_eq!(indices.len(), RECOMMENDATION_COUNT);
        }
    }

    #[test]
    fn test_self_excluded_even_when_not_row_maximum() {
        let similarity = vec![
            vec![0.1, 0.9, 0.8],
            vec![0.9, 0.1, 0.2],
            vec![0.8, 0.2, 0.1],
        ];
        let store = store(&["A", "B", "C"], similarity);
        let result = recommend(&store, "A").unwrap();
        assert_eq!(titles(&result), vec!["B", "C"]);
    }

    #[test]
    fn test_self_excluded_when_tied_with_others() {
        let similarity = vec![vec![1.0; 7]; 7];
        let store = store(&["A", "B", "C", "D", "E", "F", "G"], similarity);
        let result = recommend(&store, "C").unwrap();
        assert_eq!(titles(&result), vec!["A", "B", "D", "E", "F"]);
    }

    #[test]
    fn test_small_catalog_returns_fewer() {
        let store = store(&["A", "B", "C"], vec![vec![1.0, 0.5, 0.4]; 3]);
        let result = recommend(&store, "B").unwrap();
        assert_eq!(titles(&result), vec!["A", "C"]);
    }

    #[test]
    fn test_deterministic() {
        let store = distance_store(12);
        let first = recommend(&store, "Movie 6").unwrap();
        for _ in 0..10 {
            assert_eq!(recommend(&store, "Movie 6").unwrap(), first);
        }
    }

    #[test]
    fn test_nan_scores_rank_last() {
        let similarity = vec![vec![1.0, f32::NAN, 0.2, 0.1]; 4];
        let store = store(&["A", "B", "C", "D"], similarity);
        let result = recommend(&store, "A").unwrap();
        assert_eq!(titles(&result), vec!["C", "D", "B"]);
    }

    #[test]
    fn test_unknown_title_is_not_found() {
        let store = seven_titles();
        let result = recommend(&store, "__not_in_catalog__");
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_matching_is_case_and_whitespace_sensitive() {
        let store = seven_titles();
        assert_err!(recommend(&store, "a"));
        assert_err!(recommend(&store, "A "));
        assert_ok!(recommend(&store, "A"));
    }

    fn posters() -> PosterConfig {
        PosterConfig::new("https://image.tmdb.org/t/p/w500", "https://example.com/none.png")
    }

    fn details(id: u64) -> DisplayRecord {
        DisplayRecord {
            id: Some(id),
            title: format!("Details {}", id),
            poster_url: Some(format!("https://image.tmdb.org/t/p/w500/{}.jpg", id)),
            overview: Some("Overview".to_string()),
            release_date: None,
            rating: Some(7.5),
        }
    }

    #[tokio::test]
    async fn test_recommend_with_details_fetches_in_rank_order() {
        let store = seven_titles();
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_fetch_details()
            .times(5)
            .returning(|id| Ok(details(id)));
        provider.expect_name().return_const("mock");

        let records = recommend_with_details(&store, &provider, &posters(), "A")
            .await
            .unwrap();

        let ids: Vec<Option<u64>> = records.iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            vec![Some(101), Some(102), Some(103), Some(104), Some(105)]
        );
    }

    #[tokio::test]
    async fn test_recommend_with_details_substitutes_placeholder_on_failure() {
        let store = seven_titles();
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_fetch_details()
            .with(eq(102))
            .returning(|_| Err(AppError::remote("timeout")));
        provider
            .expect_fetch_details()
            .returning(|id| Ok(details(id)));
        provider.expect_name().return_const("mock");

        let records = recommend_with_details(&store, &provider, &posters(), "A")
            .await
            .unwrap();

        assert_eq!(records.len(), 5);
        assert_eq!(records[1].title, "C");
        assert_eq!(
            records[1].poster_url.as_deref(),
            Some("https://example.com/none.png")
        );
        assert_eq!(records[0].title, "Details 101");
    }

    #[tokio::test]
    async fn test_recommend_with_details_unknown_title_skips_fetch() {
        let store = seven_titles();
        let mut provider = MockMetadataProvider::new();
        provider.expect_fetch_details().never();

        let result = recommend_with_details(&store, &provider, &posters(), "Z").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
