use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use anyhow::Context as _;
use tokio::sync::Mutex;
use tokio::sync::mpsc;

use crate::r#gen::dispatcher;
use crate::r#gen::job::Job;
use crate::r#gen::progress::ProgressMonitor;
use crate::r#gen::snapshot::CatalogSnapshot;
use crate::r#gen::worker::Worker;
use crate::render::PageRenderer;
use crate::store::ContentStore;

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub output_root: PathBuf,
    pub workers: usize,
    pub queue_capacity: usize,
    /// `None` disables the progress monitor (headless/test runs).
    pub progress_interval: Option<Duration>,
}

#[derive(Debug, Clone, Copy)]
pub struct PipelineOutcome {
    pub pages_written: u64,
    pub elapsed: Duration,
}

/// Coordinates one full generation run: snapshot, dispatch, worker pool,
/// progress monitor. Partial failure is a normal outcome; the pipeline
/// always drains the queue and reports how many pages made it to disk.
pub struct Pipeline {
    store: Arc<dyn ContentStore>,
    renderer: Arc<dyn PageRenderer>,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(
        store: Arc<dyn ContentStore>,
        renderer: Arc<dyn PageRenderer>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            store,
            renderer,
            options,
        }
    }

    pub async fn run(&self) -> anyhow::Result<PipelineOutcome> {
        let started = Instant::now();

        let snapshot = CatalogSnapshot::load(self.store.as_ref())
            .await
            .context("load catalog snapshot")?;
        let jobs = dispatcher::dispatch(&snapshot);
        tracing::info!(
            series = snapshot.entries.len(),
            jobs = jobs.len(),
            "dispatching render jobs"
        );

        let (tx, rx) = mpsc::channel::<Job>(self.options.queue_capacity.max(1));
        let rx = Arc::new(Mutex::new(rx));
        let written = Arc::new(AtomicU64::new(0));

        let monitor = self
            .options
            .progress_interval
            .map(|interval| ProgressMonitor::spawn(Arc::clone(&written), interval));

        let worker = Arc::new(Worker {
            store: Arc::clone(&self.store),
            renderer: Arc::clone(&self.renderer),
            output_root: self.options.output_root.clone(),
        });
        let worker_count = self.options.workers.max(1);
        let mut handles = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let worker = Arc::clone(&worker);
            let rx = Arc::clone(&rx);
            let written = Arc::clone(&written);
            handles.push(tokio::spawn(worker.run(rx, written)));
        }

        // Feed the bounded queue; a full queue suspends us here, which is
        // the backpressure that caps memory on very large catalogs.
        for job in jobs {
            if tx.send(job).await.is_err() {
                break;
            }
        }
        // Closing the sender lets drained workers observe end-of-input.
        drop(tx);

        for handle in handles {
            handle.await.context("join worker")?;
        }
        if let Some(monitor) = monitor {
            monitor.stop().await;
        }

        Ok(PipelineOutcome {
            pages_written: written.load(Ordering::Relaxed),
            elapsed: started.elapsed(),
        })
    }
}
