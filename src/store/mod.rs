use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

pub mod sql;

pub use sql::SqlContentStore;

/// One serialized work. Immutable once fetched; jobs carry owned copies.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Series {
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub genre: Option<String>,
    pub release_year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One installment of a series. `number` is fractional so side content can
/// be slotted between installments (e.g. 1.5). `body` is only populated by
/// [`ContentStore::get_chapter_body`]; listings omit it to keep the catalog
/// snapshot small.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Chapter {
    pub id: u64,
    pub series_id: u64,
    #[sqlx(rename = "chapter_number")]
    pub number: f64,
    pub title: Option<String>,
    #[sqlx(rename = "content", default)]
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database query failed: {0}")]
    Query(#[from] sqlx::Error),
    #[error("content store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only catalog access. Implementations must be safe for concurrent
/// use from many workers at once.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// All series, most recently updated first.
    async fn list_series(&self) -> Result<Vec<Series>, StoreError>;

    /// Chapter metadata for one series, ascending by chapter number.
    /// Bodies are not populated.
    async fn list_chapters(&self, series_id: u64) -> Result<Vec<Chapter>, StoreError>;

    /// One chapter with its body, or `None` if the chapter does not exist.
    async fn get_chapter_body(&self, chapter_id: u64) -> Result<Option<Chapter>, StoreError>;
}
