#![allow(dead_code)]

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{TimeZone as _, Utc};
use novelpress::store::{Chapter, ContentStore, Series, StoreError};

pub fn series(id: u64, slug: &str) -> Series {
    Series {
        id,
        slug: slug.to_string(),
        title: slug.to_uppercase(),
        thumbnail_url: None,
        author: Some("Test Author".to_string()),
        description: None,
        status: Some("ongoing".to_string()),
        genre: None,
        release_year: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
    }
}

pub fn chapter(id: u64, series_id: u64, number: f64) -> Chapter {
    Chapter {
        id,
        series_id,
        number,
        title: Some(format!("Chapter {number}")),
        body: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

/// In-memory [`ContentStore`] with per-chapter failure injection, standing
/// in for the SQL store in pipeline tests.
#[derive(Default)]
pub struct MemoryStore {
    pub series: Vec<Series>,
    pub chapters: HashMap<u64, Vec<Chapter>>,
    pub bodies: HashMap<u64, String>,
    pub fail_bodies: HashSet<u64>,
    pub fail_chapter_lists: HashSet<u64>,
    pub fail_series_list: bool,
}

impl MemoryStore {
    pub fn add_series(&mut self, series: Series, chapters: Vec<Chapter>) {
        self.chapters.insert(series.id, chapters);
        self.series.push(series);
    }

    pub fn add_body(&mut self, chapter_id: u64, body: &str) {
        self.bodies.insert(chapter_id, body.to_string());
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn list_series(&self) -> Result<Vec<Series>, StoreError> {
        if self.fail_series_list {
            return Err(StoreError::Unavailable("series listing is down".into()));
        }
        Ok(self.series.clone())
    }

    async fn list_chapters(&self, series_id: u64) -> Result<Vec<Chapter>, StoreError> {
        if self.fail_chapter_lists.contains(&series_id) {
            return Err(StoreError::Unavailable(format!(
                "chapter listing is down for series {series_id}"
            )));
        }
        Ok(self.chapters.get(&series_id).cloned().unwrap_or_default())
    }

    async fn get_chapter_body(&self, chapter_id: u64) -> Result<Option<Chapter>, StoreError> {
        if self.fail_bodies.contains(&chapter_id) {
            return Err(StoreError::Unavailable(format!(
                "body fetch is down for chapter {chapter_id}"
            )));
        }
        let Some(body) = self.bodies.get(&chapter_id) else {
            return Ok(None);
        };
        let meta = self
            .chapters
            .values()
            .flatten()
            .find(|c| c.id == chapter_id)
            .expect("body registered for unknown chapter");
        let mut full = meta.clone();
        full.body = Some(body.clone());
        Ok(Some(full))
    }
}
