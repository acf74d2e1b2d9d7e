//! Event sink system for observability.
//!
//! The pipeline runner reports lifecycle events (`pipeline.started`,
//! `stage.started`, `stage.completed`, `stage.failed`, `pipeline.completed`,
//! `pipeline.aborted`) through an [`EventSink`]. The sink is passed in
//! explicitly through the pipeline context; there is no global sink.

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

/// Event type names emitted by the runner.
pub mod names {
    /// A pipeline run began.
    pub const PIPELINE_STARTED: &str = "pipeline.started";
    /// Every stage ran (some may have failed under a continue policy).
    pub const PIPELINE_COMPLETED: &str = "pipeline.completed";
    /// A fatal stage failed and the run stopped.
    pub const PIPELINE_ABORTED: &str = "pipeline.aborted";
    /// A stage is about to run.
    pub const STAGE_STARTED: &str = "stage.started";
    /// A stage succeeded.
    pub const STAGE_COMPLETED: &str = "stage.completed";
    /// A stage failed.
    pub const STAGE_FAILED: &str = "stage.failed";
    /// A stage was not run.
    pub const STAGE_SKIPPED: &str = "stage.skipped";
}
