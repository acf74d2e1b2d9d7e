//! Sequential pipeline execution.
//!
//! Stages run strictly one after another. After each stage the runner
//! checks its [`FailurePolicy`]: a fatal failure marks every remaining stage
//! as skipped, a continue failure is logged and the next stage runs.

use super::{FailurePolicy, RunReport, StageRecord, StageSpec};
use crate::console::messages;
use crate::context::{PipelineContext, StageContext};
use crate::events::names;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};

/// An ordered list of stages, validated by
/// [`PipelineBuilder`](super::PipelineBuilder).
#[derive(Debug, Clone)]
pub struct Pipeline {
    name: String,
    stages: Vec<StageSpec>,
}

impl Pipeline {
    pub(super) fn new(name: String, stages: Vec<StageSpec>) -> Self {
        Self { name, stages }
    }

    /// Returns the pipeline name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the stage specifications, in execution order.
    #[must_use]
    pub fn stages(&self) -> &[StageSpec] {
        &self.stages
    }

    /// Returns the stage names, in execution order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name.as_str()).collect()
    }

    /// Runs every stage in order and reports what happened.
    ///
    /// Never returns early: a fatal failure is recorded in
    /// [`RunReport::aborted_by`] and the remaining stages are recorded as
    /// skipped without being started.
    pub async fn run(&self, ctx: Arc<PipelineContext>) -> RunReport {
        let run_id = *ctx.run_id();
        let sink = ctx.event_sink().clone();
        let mut report = RunReport::new(&self.name, run_id);

        sink.emit(
            names::PIPELINE_STARTED,
            Some(json!({
                "pipeline": self.name,
                "run_id": run_id.to_string(),
                "stages": self.stage_names(),
            })),
        )
        .await;

        for spec in &self.stages {
            if let Some(aborted_by) = &report.aborted_by {
                let reason = format!("not run: stage '{aborted_by}' failed");
                sink.emit(
                    names::STAGE_SKIPPED,
                    Some(json!({"stage": spec.name, "reason": reason})),
                )
                .await;
                report.push(StageRecord::skipped(spec, reason));
                continue;
            }

            let record = self.run_stage(spec, &ctx).await;
            if record.status.is_failure() && spec.policy == FailurePolicy::Fatal {
                report.aborted_by = Some(spec.name.clone());
            }
            report.push(record);
        }

        let event = if report.is_aborted() {
            names::PIPELINE_ABORTED
        } else {
            names::PIPELINE_COMPLETED
        };
        sink.emit(
            event,
            Some(json!({
                "pipeline": self.name,
                "run_id": run_id.to_string(),
                "completed": report.completed(),
                "failed": report.failed(),
                "skipped": report.skipped(),
            })),
        )
        .await;

        report
    }

    async fn run_stage(&self, spec: &StageSpec, ctx: &Arc<PipelineContext>) -> StageRecord {
        let sink = ctx.event_sink();
        let console = ctx.console();

        if let Some(line) = &spec.announcement {
            console.line(line);
        }
        sink.emit(
            names::STAGE_STARTED,
            Some(json!({"stage": spec.name, "kind": spec.kind, "policy": spec.policy})),
        )
        .await;

        let stage_ctx = StageContext::new(Arc::clone(ctx), &spec.name);
        let started_at = Utc::now();
        let output = spec.runner.execute(&stage_ctx).await;
        let record = StageRecord::from_output(spec, output, started_at, Utc::now());

        if record.status.is_failure() {
            let error_text = record.error.as_deref().unwrap_or("unknown error");
            if let Some(prefix) = &spec.failure_prefix {
                console.line(&messages::failure(prefix, error_text));
            }
            sink.emit(
                names::STAGE_FAILED,
                Some(json!({
                    "stage": spec.name,
                    "error": error_text,
                    "exit_code": record.exit_code,
                    "policy": spec.policy,
                })),
            )
            .await;

            match spec.policy {
                FailurePolicy::Fatal => error!(
                    pipeline = %self.name,
                    run_id = %ctx.run_id(),
                    stage = %spec.name,
                    exit_code = ?record.exit_code,
                    error = %error_text,
                    "Fatal stage failed; skipping remaining stages"
                ),
                FailurePolicy::Continue => warn!(
                    pipeline = %self.name,
                    run_id = %ctx.run_id(),
                    stage = %spec.name,
                    exit_code = ?record.exit_code,
                    error = %error_text,
                    "Stage failed; continuing"
                ),
            }
        } else {
            sink.emit(
                names::STAGE_COMPLETED,
                Some(json!({
                    "stage": spec.name,
                    "exit_code": record.exit_code,
                    "duration_ms": record.duration_ms(),
                })),
            )
            .await;
            info!(
                pipeline = %self.name,
                run_id = %ctx.run_id(),
                stage = %spec.name,
                duration_ms = record.duration_ms(),
                "Stage completed"
            );
        }

        record
    }
}
