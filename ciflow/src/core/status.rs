//! Stage status and kind enums.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of work a stage performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
    /// Installs the dependencies later stages need.
    Install,
    /// Runs an external script.
    #[default]
    Script,
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Install => write!(f, "install"),
            Self::Script => write!(f, "script"),
        }
    }
}

/// The execution status of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    /// Stage completed successfully.
    Ok,
    /// Stage failed.
    Fail,
    /// Stage never ran because an earlier fatal stage failed.
    Skip,
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Fail => write!(f, "fail"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

impl StageStatus {
    /// Returns true if the status indicates success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Returns true if the status indicates failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Fail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_kind_display() {
        assert_eq!(StageKind::Install.to_string(), "install");
        assert_eq!(StageKind::Script.to_string(), "script");
        assert_eq!(StageKind::default(), StageKind::Script);
    }

    #[test]
    fn test_stage_status_display() {
        assert_eq!(StageStatus::Ok.to_string(), "ok");
        assert_eq!(StageStatus::Fail.to_string(), "fail");
        assert_eq!(StageStatus::Skip.to_string(), "skip");
    }

    #[test]
    fn test_stage_status_predicates() {
        assert!(StageStatus::Ok.is_success());
        assert!(!StageStatus::Ok.is_failure());
        assert!(StageStatus::Fail.is_failure());
        assert!(!StageStatus::Skip.is_success());
        assert!(!StageStatus::Skip.is_failure());
    }

    #[test]
    fn test_stage_status_serialize() {
        let json = serde_json::to_string(&StageStatus::Skip).unwrap();
        assert_eq!(json, r#""skip""#);

        let deserialized: StageStatus = serde_json::from_str(r#""fail""#).unwrap();
        assert_eq!(deserialized, StageStatus::Fail);
    }
}
