use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Context as _;
use tokio::sync::Mutex;
use tokio::sync::mpsc::Receiver;

use crate::r#gen::job::Job;
use crate::r#gen::output;
use crate::render::{Page, PageRenderer};
use crate::store::ContentStore;

pub enum JobOutcome {
    Written,
    /// The referenced chapter body no longer exists; no page is emitted and
    /// the job is not counted as a success.
    Skipped,
}

/// One execution unit of the pool. All workers share the queue receiver and
/// the success counter; everything else a worker touches is private to the
/// job it currently holds.
pub struct Worker {
    pub store: Arc<dyn ContentStore>,
    pub renderer: Arc<dyn PageRenderer>,
    pub output_root: PathBuf,
}

impl Worker {
    pub async fn run(self: Arc<Self>, queue: Arc<Mutex<Receiver<Job>>>, written: Arc<AtomicU64>) {
        loop {
            // Hold the queue lock only for the take; processing runs
            // unlocked so workers contend on nothing but the queue itself.
            let job = { queue.lock().await.recv().await };
            let Some(job) = job else {
                // Queue closed and drained.
                break;
            };

            let label = job.label();
            match self.process(job).await {
                Ok(JobOutcome::Written) => {
                    written.fetch_add(1, Ordering::Relaxed);
                }
                Ok(JobOutcome::Skipped) => {}
                Err(err) => {
                    tracing::warn!(job = %label, ?err, "job failed; continuing");
                }
            }
        }
    }

    async fn process(&self, job: Job) -> anyhow::Result<JobOutcome> {
        match job {
            Job::Series { series, chapters } => {
                let bytes = self
                    .renderer
                    .render(&Page::Series {
                        series: &series,
                        chapters: &chapters,
                    })
                    .context("render series page")?;
                let path = output::series_page_path(&self.output_root, &series.slug);
                output::write_page(&path, &bytes).await?;
                Ok(JobOutcome::Written)
            }
            Job::Chapter {
                series,
                chapter,
                prev,
                next,
                position,
                total,
            } => {
                let full = self
                    .store
                    .get_chapter_body(chapter.id)
                    .await
                    .context("fetch chapter body")?;
                let Some(full) = full else {
                    tracing::debug!(chapter = chapter.id, slug = %series.slug, "chapter body missing; skipping page");
                    return Ok(JobOutcome::Skipped);
                };

                let bytes = self
                    .renderer
                    .render(&Page::Chapter {
                        series: &series,
                        chapter: &full,
                        prev: prev.as_ref(),
                        next: next.as_ref(),
                        position,
                        total,
                    })
                    .context("render chapter page")?;
                let path = output::chapter_page_path(&self.output_root, &series.slug, full.id);
                output::write_page(&path, &bytes).await?;
                Ok(JobOutcome::Written)
            }
        }
    }
}
