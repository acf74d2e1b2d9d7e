//! Launching processes and reporting how they ended.

use super::CommandSpec;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::process::ExitStatus;
use thiserror::Error;
use tracing::debug;

/// How a finished process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitOutcome {
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Terminating signal, if the process was killed (unix only).
    pub signal: Option<i32>,
}

impl ExitOutcome {
    /// A process that exited with `code`.
    #[must_use]
    pub const fn exited(code: i32) -> Self {
        Self {
            code: Some(code),
            signal: None,
        }
    }

    /// A process killed by a signal.
    #[must_use]
    pub const fn signaled(signal: Option<i32>) -> Self {
        Self { code: None, signal }
    }

    /// Returns true if the process exited with code zero.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }

    /// Describes the outcome, e.g. `exit status 1`.
    #[must_use]
    pub fn describe(&self) -> String {
        match (self.code, self.signal) {
            (Some(code), _) => format!("exit status {code}"),
            (None, Some(signal)) => format!("terminated by signal {signal}"),
            (None, None) => "terminated by signal".to_string(),
        }
    }
}

impl From<ExitStatus> for ExitOutcome {
    fn from(status: ExitStatus) -> Self {
        #[cfg(unix)]
        let signal = std::os::unix::process::ExitStatusExt::signal(&status);
        #[cfg(not(unix))]
        let signal = None;

        match status.code() {
            Some(code) => Self::exited(code),
            None => Self::signaled(signal),
        }
    }
}

/// Failure to run a process at all.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The process could not be started (e.g. program not on `PATH`).
    #[error("failed to start {program}: {source}")]
    Spawn {
        /// The program that failed to start.
        program: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The process started but waiting on it failed.
    #[error("failed to wait for {program}: {source}")]
    Wait {
        /// The program being waited on.
        program: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Runs a command to completion and reports its exit.
///
/// Implementations block until the child has exited; nothing else runs
/// in the meantime.
#[async_trait]
pub trait ProcessLauncher: Send + Sync + Debug {
    /// Runs `command` with inherited stdout/stderr and no stdin.
    async fn launch(&self, command: &CommandSpec) -> Result<ExitOutcome, LaunchError>;
}

/// Launches real OS processes through `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

#[async_trait]
impl ProcessLauncher for SystemLauncher {
    async fn launch(&self, command: &CommandSpec) -> Result<ExitOutcome, LaunchError> {
        debug!(command = %command, "Spawning process");

        let mut child = command.to_command().spawn().map_err(|source| LaunchError::Spawn {
            program: command.program.clone(),
            source,
        })?;

        let status = child.wait().await.map_err(|source| LaunchError::Wait {
            program: command.program.clone(),
            source,
        })?;

        let outcome = ExitOutcome::from(status);
        debug!(command = %command, exit_code = ?outcome.code, "Process exited");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_outcome_success() {
        assert!(ExitOutcome::exited(0).success());
        assert!(!ExitOutcome::exited(1).success());
        assert!(!ExitOutcome::signaled(Some(15)).success());
    }

    #[test]
    fn test_exit_outcome_describe() {
        assert_eq!(ExitOutcome::exited(2).describe(), "exit status 2");
        assert_eq!(ExitOutcome::signaled(Some(9)).describe(), "terminated by signal 9");
        assert_eq!(ExitOutcome::signaled(None).describe(), "terminated by signal");
    }

    #[test]
    fn test_spawn_error_message() {
        let err = LaunchError::Spawn {
            program: "definitely-missing".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("failed to start definitely-missing:"));
    }

    #[tokio::test]
    async fn test_system_launcher_missing_program() {
        let cmd = CommandSpec::new("ciflow-test-program-that-does-not-exist");
        let result = SystemLauncher.launch(&cmd).await;
        assert!(matches!(result, Err(LaunchError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_launcher_exit_codes() {
        let ok = SystemLauncher
            .launch(&CommandSpec::new("sh").args(["-c", "exit 0"]))
            .await
            .unwrap();
        assert!(ok.success());

        let failed = SystemLauncher
            .launch(&CommandSpec::new("sh").args(["-c", "exit 7"]))
            .await
            .unwrap();
        assert_eq!(failed.code, Some(7));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_launcher_signal() {
        let killed = SystemLauncher
            .launch(&CommandSpec::new("sh").args(["-c", "kill -9 $$"]))
            .await
            .unwrap();
        assert_eq!(killed.code, None);
        assert_eq!(killed.signal, Some(9));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_launcher_child_stdin_is_empty() {
        let outcome = SystemLauncher
            .launch(&CommandSpec::new("sh").args(["-c", "if read -r line; then exit 1; fi; exit 0"]))
            .await
            .unwrap();
        assert!(outcome.success(), "child read a line from stdin: {}", outcome.describe());
    }
}
