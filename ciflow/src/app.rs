//! Top-level orchestration: guard, then the standard pipeline.

use crate::config::RunConfig;
use crate::console::{messages, Console};
use crate::context::{PipelineContext, RunIdentity};
use crate::errors::CiflowError;
use crate::events::{EventSink, LoggingEventSink};
use crate::guard::EnvironmentGuard;
use crate::pipeline::{standard, RunReport};
use crate::process::{ProcessLauncher, SystemLauncher};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs one CI job from start to finish.
#[derive(Clone)]
pub struct Orchestrator {
    config: RunConfig,
    launcher: Arc<dyn ProcessLauncher>,
    console: Console,
    event_sink: Arc<dyn EventSink>,
}

impl Orchestrator {
    /// Creates an orchestrator that launches real processes and prints to stdout.
    #[must_use]
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            launcher: Arc::new(SystemLauncher),
            console: Console::stdout(),
            event_sink: Arc::new(LoggingEventSink),
        }
    }

    /// Sets the process launcher.
    #[must_use]
    pub fn with_launcher(mut self, launcher: Arc<dyn ProcessLauncher>) -> Self {
        self.launcher = launcher;
        self
    }

    /// Sets the console.
    #[must_use]
    pub fn with_console(mut self, console: Console) -> Self {
        self.console = console;
        self
    }

    /// Sets the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = sink;
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Runs the guard and then the pipeline.
    ///
    /// On success the final console line is printed whether or not the
    /// content stages succeeded; check [`RunReport::is_degraded`] to tell.
    ///
    /// # Errors
    ///
    /// - [`CiflowError::Guard`] when not running under the CI provider; no
    ///   process has been launched.
    /// - [`CiflowError::Aborted`] when the dependency install failed; no
    ///   content stage has been launched.
    pub async fn run(&self) -> Result<RunReport, CiflowError> {
        if let Err(err) = EnvironmentGuard::new(&self.config.ci).check() {
            self.console.line(messages::GUARD_REJECTED);
            warn!(error = %err, "Refusing to run outside CI");
            return Err(err.into());
        }

        let pipeline = standard::ci_pipeline(&self.config, Arc::clone(&self.launcher))?;
        let run_id = RunIdentity::new();
        let ctx = Arc::new(
            PipelineContext::new(pipeline.name(), run_id)
                .with_event_sink(Arc::clone(&self.event_sink))
                .with_console(self.console.clone()),
        );

        info!(pipeline = %pipeline.name(), run_id = %run_id, "Starting run");
        let report = pipeline.run(ctx).await;

        if let Some(stage) = report.aborted_by.clone() {
            let error = report
                .record(&stage)
                .and_then(|r| r.error.clone())
                .unwrap_or_default();
            return Err(CiflowError::Aborted {
                stage,
                error,
                report: Box::new(report),
            });
        }

        self.console.line(messages::RUN_FINISHED);
        if report.is_degraded() {
            warn!(
                run_id = %run_id,
                failed = ?report.failed(),
                "Run finished with failed stages; exit status stays 0"
            );
        } else {
            info!(run_id = %run_id, "Run finished");
        }

        Ok(report)
    }
}

impl fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .field("launcher", &self.launcher)
            .finish_non_exhaustive()
    }
}
