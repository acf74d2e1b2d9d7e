//! Stage specifications.

use super::FailurePolicy;
use crate::core::StageKind;
use crate::errors::PipelineValidationError;
use crate::stages::Stage;
use std::sync::Arc;

/// Specification for a single stage in a pipeline.
#[derive(Debug, Clone)]
pub struct StageSpec {
    /// The unique name of the stage.
    pub name: String,
    /// The stage implementation.
    pub runner: Arc<dyn Stage>,
    /// The kind of stage.
    pub kind: StageKind,
    /// What a failure of this stage does to the run.
    pub policy: FailurePolicy,
    /// Console line printed before the stage runs.
    pub announcement: Option<String>,
    /// Console prefix printed, followed by the error, when the stage fails.
    pub failure_prefix: Option<String>,
}

impl StageSpec {
    /// Creates a new stage specification with a fatal failure policy.
    #[must_use]
    pub fn new(name: impl Into<String>, runner: Arc<dyn Stage>) -> Self {
        Self {
            name: name.into(),
            runner,
            kind: StageKind::default(),
            policy: FailurePolicy::default(),
            announcement: None,
            failure_prefix: None,
        }
    }

    /// Sets the stage kind.
    #[must_use]
    pub fn with_kind(mut self, kind: StageKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the failure policy.
    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Marks failures of this stage as logged-and-continue.
    #[must_use]
    pub fn continue_on_failure(self) -> Self {
        self.with_policy(FailurePolicy::Continue)
    }

    /// Sets the line printed before the stage runs.
    #[must_use]
    pub fn with_announcement(mut self, line: impl Into<String>) -> Self {
        self.announcement = Some(line.into());
        self
    }

    /// Sets the prefix of the line printed when the stage fails.
    #[must_use]
    pub fn with_failure_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.failure_prefix = Some(prefix.into());
        self
    }

    /// Validates the stage specification.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or whitespace-only.
    pub fn validate(&self) -> Result<(), PipelineValidationError> {
        if self.name.trim().is_empty() {
            return Err(PipelineValidationError::blank_stage_name());
        }
        Ok(())
    }
}
