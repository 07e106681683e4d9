use std::cmp::Ordering;

use crate::store::{Chapter, ContentStore, Series, StoreError};

/// One series with its ordered chapter metadata.
#[derive(Debug, Clone)]
pub struct SeriesEntry {
    pub series: Series,
    pub chapters: Vec<Chapter>,
}

/// Immutable in-memory copy of the catalog, fetched once per run. Jobs are
/// dispatched from this snapshot; the store is only consulted again for
/// chapter bodies.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub entries: Vec<SeriesEntry>,
}

impl CatalogSnapshot {
    /// Fetches every series and its chapter list. A failing series listing
    /// is fatal; a series whose chapter listing fails is skipped entirely
    /// (logged) and the rest of the catalog still builds.
    pub async fn load(store: &dyn ContentStore) -> Result<Self, StoreError> {
        let series_list = store.list_series().await?;

        let mut entries = Vec::with_capacity(series_list.len());
        for series in series_list {
            match store.list_chapters(series.id).await {
                Ok(mut chapters) => {
                    // The store already orders by chapter number; re-sort
                    // stably so a misbehaving store or tied numbers cannot
                    // break prev/next linkage.
                    chapters.sort_by(|a, b| {
                        a.number.partial_cmp(&b.number).unwrap_or(Ordering::Equal)
                    });
                    entries.push(SeriesEntry { series, chapters });
                }
                Err(err) => {
                    tracing::warn!(slug = %series.slug, error = %err, "skipping series: chapter listing failed");
                }
            }
        }

        Ok(Self { entries })
    }

    /// Total job count a dispatch of this snapshot will produce.
    pub fn job_count(&self) -> usize {
        self.entries.len() + self.entries.iter().map(|e| e.chapters.len()).sum::<usize>()
    }
}
