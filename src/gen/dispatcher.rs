use crate::r#gen::job::Job;
use crate::r#gen::snapshot::CatalogSnapshot;

/// Expands the snapshot into one series job per series plus one chapter job
/// per chapter. Prev/next navigation is computed here, once, so workers
/// never need a global chapter order at execution time. Jobs may then be
/// processed in any relative order.
pub fn dispatch(snapshot: &CatalogSnapshot) -> Vec<Job> {
    let mut jobs = Vec::with_capacity(snapshot.job_count());

    for entry in &snapshot.entries {
        jobs.push(Job::Series {
            series: entry.series.clone(),
            chapters: entry.chapters.clone(),
        });

        let total = entry.chapters.len();
        for (i, chapter) in entry.chapters.iter().enumerate() {
            jobs.push(Job::Chapter {
                series: entry.series.clone(),
                chapter: chapter.clone(),
                prev: (i > 0).then(|| entry.chapters[i - 1].clone()),
                next: (i + 1 < total).then(|| entry.chapters[i + 1].clone()),
                position: i + 1,
                total,
            });
        }
    }

    jobs
}
