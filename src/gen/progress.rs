use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Passive observer of the shared success counter. Reports the cumulative
/// count on a fixed cadence and has no effect on the pipeline outcome, so
/// headless runs can simply not spawn it.
pub struct ProgressMonitor {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl ProgressMonitor {
    pub fn spawn(written: Arc<AtomicU64>, interval: Duration) -> Self {
        let (stop, mut stopped) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // interval fires immediately; swallow that tick so the first
            // report lands a full interval in.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        tracing::info!(pages = written.load(Ordering::Relaxed), "generation progress");
                    }
                    changed = stopped.changed() => {
                        if changed.is_err() || *stopped.borrow() {
                            break;
                        }
                    }
                }
            }
        });
        Self { stop, handle }
    }

    /// Signals the tick loop and waits for the task to exit so the timer
    /// does not outlive the run.
    pub async fn stop(self) {
        let _ = self.stop.send(true);
        let _ = self.handle.await;
    }
}
