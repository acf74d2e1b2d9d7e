//! A stage that runs one external process.

use super::Stage;
use crate::context::StageContext;
use crate::core::StageOutput;
use crate::process::{CommandSpec, ProcessLauncher};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Runs a [`CommandSpec`] through a [`ProcessLauncher`] and maps its exit
/// onto a [`StageOutput`].
///
/// A process that cannot be started fails the stage exactly like a
/// non-zero exit does.
#[derive(Debug, Clone)]
pub struct CommandStage {
    name: String,
    command: CommandSpec,
    launcher: Arc<dyn ProcessLauncher>,
}

impl CommandStage {
    /// Creates a new command stage.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        command: CommandSpec,
        launcher: Arc<dyn ProcessLauncher>,
    ) -> Self {
        Self {
            name: name.into(),
            command,
            launcher,
        }
    }
}

#[async_trait]
impl Stage for CommandStage {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self, ctx: &StageContext) -> StageOutput {
        debug!(
            run_id = %ctx.run_id(),
            stage = %self.name,
            command = %self.command,
            "Launching stage command"
        );

        match self.launcher.launch(&self.command).await {
            Ok(outcome) => StageOutput::from_exit(&outcome),
            Err(err) => StageOutput::fail(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Console;
    use crate::context::{PipelineContext, RunIdentity};
    use crate::testing::{RecordingLauncher, ScriptedExit};

    fn ctx() -> StageContext {
        let pipeline =
            Arc::new(PipelineContext::new("test", RunIdentity::new()).with_console(Console::sink()));
        StageContext::new(pipeline, "generate")
    }

    #[tokio::test]
    async fn test_success_maps_to_ok() {
        let launcher = Arc::new(RecordingLauncher::new());
        let cmd = CommandSpec::new("python").arg("gen.py");
        let stage = CommandStage::new("generate", cmd.clone(), launcher.clone());

        let output = stage.execute(&ctx()).await;

        assert!(output.is_success());
        assert_eq!(output.exit_code, Some(0));
        assert_eq!(launcher.invocations(), vec![cmd]);
    }

    #[tokio::test]
    async fn test_nonzero_exit_maps_to_fail() {
        let launcher = Arc::new(RecordingLauncher::new().respond("python gen.py", ScriptedExit::Code(1)));
        let stage = CommandStage::new("generate", CommandSpec::new("python").arg("gen.py"), launcher);

        let output = stage.execute(&ctx()).await;

        assert!(output.is_failure());
        assert_eq!(output.exit_code, Some(1));
        assert_eq!(output.error_text(), "exit status 1");
    }

    #[tokio::test]
    async fn test_spawn_failure_maps_to_fail() {
        let launcher = Arc::new(RecordingLauncher::new().respond("python gen.py", ScriptedExit::SpawnError));
        let stage = CommandStage::new("generate", CommandSpec::new("python").arg("gen.py"), launcher);

        let output = stage.execute(&ctx()).await;

        assert!(output.is_failure());
        assert_eq!(output.exit_code, None);
        assert!(output.error_text().starts_with("failed to start python"));
    }
}
