use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

use crate::store::{Chapter, ContentStore, Series, StoreError};

/// MySQL-backed [`ContentStore`]. The pool is sized to match the worker
/// pool ceiling so just-in-time body fetches do not starve each other.
#[derive(Debug, Clone)]
pub struct SqlContentStore {
    pool: MySqlPool,
}

impl SqlContentStore {
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = MySqlPoolOptions::new()
            .max_connections(100)
            .acquire_timeout(Duration::from_secs(30))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore for SqlContentStore {
    async fn list_series(&self) -> Result<Vec<Series>, StoreError> {
        let series = sqlx::query_as::<_, Series>(
            "SELECT id, slug, title, thumbnail_url, author, description, status, genre, \
             release_year, created_at, updated_at \
             FROM series ORDER BY updated_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(series)
    }

    async fn list_chapters(&self, series_id: u64) -> Result<Vec<Chapter>, StoreError> {
        let chapters = sqlx::query_as::<_, Chapter>(
            "SELECT id, series_id, chapter_number, title, created_at, updated_at \
             FROM chapters WHERE series_id = ? ORDER BY chapter_number ASC",
        )
        .bind(series_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(chapters)
    }

    async fn get_chapter_body(&self, chapter_id: u64) -> Result<Option<Chapter>, StoreError> {
        let chapter = sqlx::query_as::<_, Chapter>(
            "SELECT id, series_id, chapter_number, title, content, created_at, updated_at \
             FROM chapters WHERE id = ?",
        )
        .bind(chapter_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(chapter)
    }
}
