//! Stage output type with factory methods.

use super::StageStatus;
use crate::process::ExitOutcome;
use serde::{Deserialize, Serialize};

/// The output of a stage execution.
///
/// `StageOutput` is immutable once created and provides factory methods
/// for creating outputs with different statuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageOutput {
    /// The status of the stage execution.
    pub status: StageStatus,

    /// Exit code of the underlying process, when the OS reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,

    /// Error message (for failed executions).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Skip reason (for skipped executions).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
}

impl Default for StageOutput {
    fn default() -> Self {
        Self::ok()
    }
}

impl StageOutput {
    /// Creates a successful output.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            status: StageStatus::Ok,
            exit_code: None,
            error: None,
            skip_reason: None,
        }
    }

    /// Creates a failure output with an error message.
    #[must_use]
    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            status: StageStatus::Fail,
            exit_code: None,
            error: Some(error.into()),
            skip_reason: None,
        }
    }

    /// Creates a skip output with a reason.
    #[must_use]
    pub fn skip(reason: impl Into<String>) -> Self {
        Self {
            status: StageStatus::Skip,
            exit_code: None,
            error: None,
            skip_reason: Some(reason.into()),
        }
    }

    /// Maps a finished process onto a stage output.
    ///
    /// Exit code zero is success; anything else, including death by
    /// signal, is a failure described the way `exit status 2` reads.
    #[must_use]
    pub fn from_exit(outcome: &ExitOutcome) -> Self {
        let base = if outcome.success() {
            Self::ok()
        } else {
            Self::fail(outcome.describe())
        };
        Self {
            exit_code: outcome.code,
            ..base
        }
    }

    /// Returns true if the stage succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns true if the stage failed.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        self.status.is_failure()
    }

    /// Returns the error text, or a placeholder if none was recorded.
    #[must_use]
    pub fn error_text(&self) -> &str {
        self.error.as_deref().unwrap_or("unknown error")
    }
}
