//! Failure policies and the per-run report.
//!
//! Each stage declares whether its failure stops the run ([`FailurePolicy::Fatal`])
//! or is only logged ([`FailurePolicy::Continue`]). The runner records what
//! happened to every stage in a [`RunReport`].

use super::StageSpec;
use crate::context::RunIdentity;
use crate::core::{StageKind, StageOutput, StageStatus};
use crate::errors::FATAL_EXIT_CODE;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How to handle a stage failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop the pipeline; remaining stages are skipped (default).
    #[default]
    Fatal,
    /// Log the failure and run the next stage anyway.
    Continue,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fatal => write!(f, "fatal"),
            Self::Continue => write!(f, "continue"),
        }
    }
}

/// What happened to one stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRecord {
    /// Stage name.
    pub name: String,
    /// Stage kind.
    pub kind: StageKind,
    /// The policy the stage ran under.
    pub policy: FailurePolicy,
    /// Final status.
    pub status: StageStatus,
    /// Process exit code, when there was one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
    /// Error message if failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Why the stage did not run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
    /// When the stage started.
    pub started_at: DateTime<Utc>,
    /// When the stage ended.
    pub ended_at: DateTime<Utc>,
}

impl StageRecord {
    /// Records a stage that ran.
    #[must_use]
    pub fn from_output(
        spec: &StageSpec,
        output: StageOutput,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: spec.name.clone(),
            kind: spec.kind,
            policy: spec.policy,
            status: output.status,
            exit_code: output.exit_code,
            error: output.error,
            skip_reason: output.skip_reason,
            started_at,
            ended_at,
        }
    }

    /// Records a stage that was never started.
    #[must_use]
    pub fn skipped(spec: &StageSpec, reason: impl Into<String>) -> Self {
        let now = Utc::now();
        Self::from_output(spec, StageOutput::skip(reason), now, now)
    }

    /// Returns the duration in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> i64 {
        (self.ended_at - self.started_at).num_milliseconds()
    }
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// The pipeline name.
    pub pipeline: String,
    /// The run this report belongs to.
    pub run_id: RunIdentity,
    /// One record per stage, in pipeline order.
    pub stages: Vec<StageRecord>,
    /// The fatal stage that stopped the run, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted_by: Option<String>,
}

impl RunReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new(pipeline: impl Into<String>, run_id: RunIdentity) -> Self {
        Self {
            pipeline: pipeline.into(),
            run_id,
            stages: Vec::new(),
            aborted_by: None,
        }
    }

    /// Appends a stage record.
    pub fn push(&mut self, record: StageRecord) {
        self.stages.push(record);
    }

    /// Returns the record for a stage.
    #[must_use]
    pub fn record(&self, name: &str) -> Option<&StageRecord> {
        self.stages.iter().find(|r| r.name == name)
    }

    /// Names of stages that succeeded.
    #[must_use]
    pub fn completed(&self) -> Vec<&str> {
        self.names_with(StageStatus::Ok)
    }

    /// Names of stages that failed.
    #[must_use]
    pub fn failed(&self) -> Vec<&str> {
        self.names_with(StageStatus::Fail)
    }

    /// Names of stages that never ran.
    #[must_use]
    pub fn skipped(&self) -> Vec<&str> {
        self.names_with(StageStatus::Skip)
    }

    /// Returns true if a fatal stage stopped the run.
    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        self.aborted_by.is_some()
    }

    /// Returns true if the run finished but some stage failed.
    ///
    /// A degraded run still exits with status 0.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.is_aborted() && self.stages.iter().any(|r| r.status.is_failure())
    }

    /// The process exit status this run maps to.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        if self.is_aborted() {
            FATAL_EXIT_CODE
        } else {
            0
        }
    }

    fn names_with(&self, status: StageStatus) -> Vec<&str> {
        self.stages
            .iter()
            .filter(|r| r.status == status)
            .map(|r| r.name.as_str())
            .collect()
    }
}
