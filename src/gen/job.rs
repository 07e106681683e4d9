use crate::store::{Chapter, Series};

/// One unit of rendering work. Jobs own their data outright so a worker
/// never reaches back into the catalog snapshot while another worker holds
/// it; `prev`/`next` are copies taken at dispatch time, not slice indices.
#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    /// Table-of-contents page for one series. Chapters are metadata only.
    Series {
        series: Series,
        chapters: Vec<Chapter>,
    },
    /// One chapter page. The body is fetched just-in-time by the worker;
    /// `position` is 1-based within `total` chapters.
    Chapter {
        series: Series,
        chapter: Chapter,
        prev: Option<Chapter>,
        next: Option<Chapter>,
        position: usize,
        total: usize,
    },
}

impl Job {
    /// Identity string for diagnostics when a job fails.
    pub fn label(&self) -> String {
        match self {
            Job::Series { series, .. } => format!("series page for '{}'", series.slug),
            Job::Chapter {
                series, chapter, ..
            } => format!("chapter {} of '{}'", chapter.id, series.slug),
        }
    }
}
