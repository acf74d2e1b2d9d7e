//! Mocks for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::Arc;

use crate::context::StageContext;
use crate::core::StageOutput;
use crate::process::{CommandSpec, ExitOutcome, LaunchError, ProcessLauncher};
use crate::stages::Stage;

/// What a [`RecordingLauncher`] reports for a given command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedExit {
    /// Exit with this code.
    Code(i32),
    /// Killed by this signal.
    Signal(i32),
    /// The program could not be started.
    SpawnError,
}

/// A launcher that records every command and answers from a script.
///
/// Commands are matched on their display form (`program arg1 arg2`).
/// Unscripted commands exit with code zero.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    responses: HashMap<String, ScriptedExit>,
    invocations: Mutex<Vec<CommandSpec>>,
}

impl RecordingLauncher {
    /// Creates a launcher where every command succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the response for one command line.
    #[must_use]
    pub fn respond(mut self, command_line: impl Into<String>, exit: ScriptedExit) -> Self {
        self.responses.insert(command_line.into(), exit);
        self
    }

    /// Returns every launched command, in order.
    #[must_use]
    pub fn invocations(&self) -> Vec<CommandSpec> {
        self.invocations.lock().clone()
    }

    /// Returns every launched command line, in order.
    #[must_use]
    pub fn command_lines(&self) -> Vec<String> {
        self.invocations.lock().iter().map(ToString::to_string).collect()
    }

    /// Returns the number of launches.
    #[must_use]
    pub fn launch_count(&self) -> usize {
        self.invocations.lock().len()
    }

    /// Returns how many times a command line was launched.
    #[must_use]
    pub fn times_launched(&self, command_line: &str) -> usize {
        self.invocations
            .lock()
            .iter()
            .filter(|cmd| cmd.to_string() == command_line)
            .count()
    }
}

#[async_trait]
impl ProcessLauncher for RecordingLauncher {
    async fn launch(&self, command: &CommandSpec) -> Result<ExitOutcome, LaunchError> {
        self.invocations.lock().push(command.clone());

        match self
            .responses
            .get(&command.to_string())
            .copied()
            .unwrap_or(ScriptedExit::Code(0))
        {
            ScriptedExit::Code(code) => Ok(ExitOutcome::exited(code)),
            ScriptedExit::Signal(signal) => Ok(ExitOutcome::signaled(Some(signal))),
            ScriptedExit::SpawnError => Err(LaunchError::Spawn {
                program: command.program.clone(),
                source: io::Error::from(io::ErrorKind::NotFound),
            }),
        }
    }
}

/// Shared log of stage names, in the order stages were executed.
pub type CallLog = Arc<Mutex<Vec<String>>>;

/// A mock stage that records calls and returns a configurable output.
#[derive(Debug)]
pub struct MockStage {
    name: String,
    output: Mutex<StageOutput>,
    call_count: Mutex<usize>,
    call_log: Option<CallLog>,
}

impl MockStage {
    /// Creates a new mock stage with a success output.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            output: Mutex::new(StageOutput::ok()),
            call_count: Mutex::new(0),
            call_log: None,
        }
    }

    /// Creates a mock stage that always fails with `error`.
    #[must_use]
    pub fn failing(name: impl Into<String>, error: impl Into<String>) -> Self {
        let stage = Self::new(name);
        stage.set_output(StageOutput::fail(error));
        stage
    }

    /// Appends the stage name to `log` on every call.
    #[must_use]
    pub fn with_call_log(mut self, log: CallLog) -> Self {
        self.call_log = Some(log);
        self
    }

    /// Sets the output to return.
    pub fn set_output(&self, output: StageOutput) {
        *self.output.lock() = output;
    }

    /// Returns the number of times the stage was called.
    #[must_use]
    pub fn call_count(&self) -> usize {
        *self.call_count.lock()
    }
}

#[async_trait]
impl Stage for MockStage {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self, ctx: &StageContext) -> StageOutput {
        *self.call_count.lock() += 1;
        if let Some(log) = &self.call_log {
            log.lock().push(ctx.stage_name().to_string());
        }
        self.output.lock().clone()
    }
}

/// An in-memory writer whose clones share one buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.lock()).into_owned()
    }

    /// Returns everything written so far, split into lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
