//! The concurrent generation pipeline: catalog snapshot -> job dispatch ->
//! bounded queue -> worker pool -> rendered files, with a passive progress
//! monitor. Per-job failures are isolated; the pipeline always drains.

pub mod dispatcher;
pub mod job;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod snapshot;
pub mod worker;

pub use job::Job;
pub use pipeline::{Pipeline, PipelineOptions, PipelineOutcome};
pub use snapshot::CatalogSnapshot;
