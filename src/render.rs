use askama::Template;
use thiserror::Error;

use crate::store::{Chapter, Series};

/// Render data for one page, borrowed from the job being processed.
/// The variant selects the template.
#[derive(Debug, Clone, Copy)]
pub enum Page<'a> {
    Home {
        series: &'a [Series],
    },
    Series {
        series: &'a Series,
        chapters: &'a [Chapter],
    },
    Chapter {
        series: &'a Series,
        chapter: &'a Chapter,
        prev: Option<&'a Chapter>,
        next: Option<&'a Chapter>,
        position: usize,
        total: usize,
    },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

/// Turns render data into page bytes. Implementations must be safe to call
/// from many workers concurrently.
pub trait PageRenderer: Send + Sync {
    fn render(&self, page: &Page<'_>) -> Result<Vec<u8>, RenderError>;
}

#[derive(Template)]
#[template(path = "index.html")]
struct HomeTemplate<'a> {
    series: &'a [Series],
}

#[derive(Template)]
#[template(path = "series.html")]
struct SeriesTemplate<'a> {
    series: &'a Series,
    chapters: &'a [Chapter],
}

#[derive(Template)]
#[template(path = "chapter.html")]
struct ChapterTemplate<'a> {
    series: &'a Series,
    chapter: &'a Chapter,
    prev: Option<&'a Chapter>,
    next: Option<&'a Chapter>,
    position: usize,
    total: usize,
}

/// Askama-backed renderer. Templates are compiled into the binary, so a
/// render failure means a missing field at runtime, not a missing file.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl PageRenderer for HtmlRenderer {
    fn render(&self, page: &Page<'_>) -> Result<Vec<u8>, RenderError> {
        let html = match *page {
            Page::Home { series } => HomeTemplate { series }.render()?,
            Page::Series { series, chapters } => SeriesTemplate { series, chapters }.render()?,
            Page::Chapter {
                series,
                chapter,
                prev,
                next,
                position,
                total,
            } => ChapterTemplate {
                series,
                chapter,
                prev,
                next,
                position,
                total,
            }
            .render()?,
        };
        Ok(html.into_bytes())
    }
}
