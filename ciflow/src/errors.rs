//! Error types for ciflow.
//!
//! Two tiers matter to the caller: errors that abort the run (surfaced as
//! [`CiflowError`] and mapped to exit status 1) and stage failures that are
//! only logged, which never become errors and live in the
//! [`RunReport`](crate::pipeline::RunReport) instead.

use crate::pipeline::RunReport;
use thiserror::Error;

/// Exit status used for every fatal outcome.
pub const FATAL_EXIT_CODE: u8 = 1;

/// The main error type for ciflow operations.
#[derive(Debug, Error)]
pub enum CiflowError {
    /// The process is not running under the expected CI provider.
    #[error("{0}")]
    Guard(#[from] GuardError),

    /// The pipeline definition is invalid.
    #[error("{0}")]
    Validation(#[from] PipelineValidationError),

    /// A stage with a fatal failure policy failed; remaining stages were skipped.
    #[error("Stage '{stage}' failed: {error}")]
    Aborted {
        /// The stage that failed.
        stage: String,
        /// Description of the failure.
        error: String,
        /// Report of everything that ran before the abort.
        report: Box<RunReport>,
    },
}

impl CiflowError {
    /// Returns the process exit status for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        FATAL_EXIT_CODE
    }

    /// Returns the partial run report, if the error carries one.
    #[must_use]
    pub fn report(&self) -> Option<&RunReport> {
        match self {
            Self::Aborted { report, .. } => Some(&**report),
            _ => None,
        }
    }
}

/// Raised when the CI detection variable does not hold the sentinel value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "environment variable {variable} must be \"{expected}\" (found: {})",
    .observed.as_deref().map_or_else(|| "unset".to_string(), |v| format!("\"{v}\""))
)]
pub struct GuardError {
    /// The variable that was checked.
    pub variable: String,
    /// The sentinel value it must hold.
    pub expected: String,
    /// What was actually observed, if the variable was set.
    pub observed: Option<String>,
}

impl GuardError {
    /// Creates a new guard error.
    #[must_use]
    pub fn new(
        variable: impl Into<String>,
        expected: impl Into<String>,
        observed: Option<String>,
    ) -> Self {
        Self {
            variable: variable.into(),
            expected: expected.into(),
            observed,
        }
    }
}

/// Error raised when pipeline validation fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PipelineValidationError {
    /// Short machine-readable code (e.g. `PIPELINE-EMPTY`).
    pub code: &'static str,
    /// The error message.
    pub message: String,
    /// The stages involved in the error.
    pub stages: Vec<String>,
}

impl PipelineValidationError {
    /// Creates a new pipeline validation error.
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            stages: Vec::new(),
        }
    }

    /// Sets the stages involved.
    #[must_use]
    pub fn with_stages(mut self, stages: Vec<String>) -> Self {
        self.stages = stages;
        self
    }

    /// The pipeline has no stages.
    #[must_use]
    pub fn empty(pipeline: &str) -> Self {
        Self::new(
            "PIPELINE-EMPTY",
            format!("Pipeline '{pipeline}' has no stages"),
        )
    }

    /// A stage was given an empty or whitespace-only name.
    #[must_use]
    pub fn blank_stage_name() -> Self {
        Self::new(
            "PIPELINE-BLANK-NAME",
            "Stage name cannot be empty or whitespace-only",
        )
    }

    /// Two stages share a name.
    #[must_use]
    pub fn duplicate_stage(name: &str) -> Self {
        Self::new(
            "PIPELINE-DUPLICATE",
            format!("Stage '{name}' is defined more than once"),
        )
        .with_stages(vec![name.to_string()])
    }
}
