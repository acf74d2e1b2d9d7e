//! Pipeline and stage execution contexts.

use super::RunIdentity;
use crate::console::Console;
use crate::events::{EventSink, NoOpEventSink};
use std::fmt;
use std::sync::Arc;

/// State shared by every stage of one pipeline run.
///
/// Built once before the run and never mutated afterwards.
pub struct PipelineContext {
    run_id: RunIdentity,
    pipeline_name: String,
    event_sink: Arc<dyn EventSink>,
    console: Console,
}

impl PipelineContext {
    /// Creates a context with a no-op event sink and a stdout console.
    #[must_use]
    pub fn new(pipeline_name: impl Into<String>, run_id: RunIdentity) -> Self {
        Self {
            run_id,
            pipeline_name: pipeline_name.into(),
            event_sink: Arc::new(NoOpEventSink),
            console: Console::stdout(),
        }
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = sink;
        self
    }

    /// Sets the console.
    #[must_use]
    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    /// Returns the run identity.
    #[must_use]
    pub const fn run_id(&self) -> &RunIdentity {
        &self.run_id
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn pipeline_name(&self) -> &str {
        &self.pipeline_name
    }

    /// Returns the event sink.
    #[must_use]
    pub const fn event_sink(&self) -> &Arc<dyn EventSink> {
        &self.event_sink
    }

    /// Returns the console.
    #[must_use]
    pub const fn console(&self) -> &Console {
        &self.console
    }
}

impl fmt::Debug for PipelineContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineContext")
            .field("run_id", &self.run_id)
            .field("pipeline_name", &self.pipeline_name)
            .finish_non_exhaustive()
    }
}

/// Context handed to a single stage.
#[derive(Debug, Clone)]
pub struct StageContext {
    pipeline_ctx: Arc<PipelineContext>,
    stage_name: String,
}

impl StageContext {
    /// Creates a stage context.
    #[must_use]
    pub fn new(pipeline_ctx: Arc<PipelineContext>, stage_name: impl Into<String>) -> Self {
        Self {
            pipeline_ctx,
            stage_name: stage_name.into(),
        }
    }

    /// Returns the stage name.
    #[must_use]
    pub fn stage_name(&self) -> &str {
        &self.stage_name
    }

    /// Returns the pipeline context.
    #[must_use]
    pub const fn pipeline_ctx(&self) -> &Arc<PipelineContext> {
        &self.pipeline_ctx
    }

    /// Returns the run identity.
    #[must_use]
    pub fn run_id(&self) -> &RunIdentity {
        self.pipeline_ctx.run_id()
    }
}
