//! End-to-end scenarios for a full orchestrated run.

use crate::app::Orchestrator;
use crate::config::{CiDetection, RunConfig};
use crate::console::{messages, Console};
use crate::core::StageStatus;
use crate::errors::CiflowError;
use crate::events::CollectingEventSink;
use crate::pipeline::standard::{GENERATE_STAGE, INJECT_STAGE, INSTALL_STAGE};
use crate::process::CommandSpec;
use crate::testing::{RecordingLauncher, ScriptedExit, SharedBuffer};
use pretty_assertions::assert_eq;
use std::sync::Arc;

const INSTALL: &str = "pip install pandas openai requests python-slugify";
const GENERATE: &str = "python content-engine/generator.py";
const INJECT: &str = "python inject_affiliates.py";

struct Harness {
    launcher: Arc<RecordingLauncher>,
    console: SharedBuffer,
    events: Arc<CollectingEventSink>,
    orchestrator: Orchestrator,
}

fn harness(ci: CiDetection, launcher: RecordingLauncher) -> Harness {
    let launcher = Arc::new(launcher);
    let console = SharedBuffer::new();
    let events = Arc::new(CollectingEventSink::new());
    let orchestrator = Orchestrator::new(RunConfig::new(ci))
        .with_launcher(launcher.clone())
        .with_console(Console::from_writer(console.clone()))
        .with_event_sink(events.clone());

    Harness {
        launcher,
        console,
        events,
        orchestrator,
    }
}

#[tokio::test]
async fn test_sentinel_absent_launches_nothing() {
    let h = harness(CiDetection::absent(), RecordingLauncher::new());

    let err = h.orchestrator.run().await.unwrap_err();

    assert!(matches!(err, CiflowError::Guard(_)));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(h.launcher.launch_count(), 0);
    assert!(h.events.is_empty());
}

#[tokio::test]
async fn test_any_non_sentinel_value_launches_nothing() {
    for value in ["", "false", "TRUE", "1", "true\n"] {
        let h = harness(
            CiDetection::from_observed(Some(value.to_string())),
            RecordingLauncher::new(),
        );

        let err = h.orchestrator.run().await.unwrap_err();

        assert_eq!(err.exit_code(), 1, "value {value:?}");
        assert_eq!(h.launcher.launch_count(), 0, "value {value:?}");
    }
}

#[tokio::test]
async fn test_installer_invoked_once_with_fixed_packages() {
    let h = harness(CiDetection::present(), RecordingLauncher::new());

    h.orchestrator.run().await.unwrap();

    let first = &h.launcher.invocations()[0];
    assert_eq!(
        first,
        &CommandSpec::new("pip").args(["install", "pandas", "openai", "requests", "python-slugify"])
    );
    assert_eq!(h.launcher.times_launched(INSTALL), 1);
}

#[tokio::test]
async fn test_installer_failure_launches_no_scripts() {
    let h = harness(
        CiDetection::present(),
        RecordingLauncher::new().respond(INSTALL, ScriptedExit::Code(1)),
    );

    let err = h.orchestrator.run().await.unwrap_err();

    assert_eq!(err.exit_code(), 1);
    assert_eq!(h.launcher.command_lines(), vec![INSTALL]);

    let CiflowError::Aborted { stage, error, report } = err else {
        panic!("expected an aborted run");
    };
    assert_eq!(stage, INSTALL_STAGE);
    assert_eq!(error, "exit status 1");
    assert_eq!(report.skipped(), vec![GENERATE_STAGE, INJECT_STAGE]);

    assert_eq!(
        h.console.lines(),
        vec![
            messages::INSTALL_ANNOUNCE.to_string(),
            messages::failure(messages::INSTALL_FAILED, "exit status 1"),
        ]
    );
}

#[tokio::test]
async fn test_installer_missing_is_fatal() {
    let h = harness(
        CiDetection::present(),
        RecordingLauncher::new().respond(INSTALL, ScriptedExit::SpawnError),
    );

    let err = h.orchestrator.run().await.unwrap_err();

    assert!(matches!(err, CiflowError::Aborted { .. }));
    assert_eq!(h.launcher.launch_count(), 1);
}

#[tokio::test]
async fn test_generator_failure_still_runs_injector() {
    let h = harness(
        CiDetection::present(),
        RecordingLauncher::new().respond(GENERATE, ScriptedExit::Code(1)),
    );

    let report = h.orchestrator.run().await.unwrap();

    assert_eq!(h.launcher.command_lines(), vec![INSTALL, GENERATE, INJECT]);
    assert_eq!(report.exit_code(), 0);
    assert!(report.is_degraded());
    assert_eq!(report.record(GENERATE_STAGE).unwrap().status, StageStatus::Fail);
    assert_eq!(report.record(INJECT_STAGE).unwrap().status, StageStatus::Ok);

    assert_eq!(
        h.console.lines(),
        vec![
            messages::INSTALL_ANNOUNCE.to_string(),
            messages::GENERATOR_ANNOUNCE.to_string(),
            messages::failure(messages::GENERATOR_FAILED, "exit status 1"),
            messages::INJECTOR_ANNOUNCE.to_string(),
            messages::RUN_FINISHED.to_string(),
        ]
    );
}

#[tokio::test]
async fn test_both_scripts_failing_still_exits_zero() {
    let h = harness(
        CiDetection::present(),
        RecordingLauncher::new()
            .respond(GENERATE, ScriptedExit::Signal(9))
            .respond(INJECT, ScriptedExit::SpawnError),
    );

    let report = h.orchestrator.run().await.unwrap();

    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.failed(), vec![GENERATE_STAGE, INJECT_STAGE]);
    assert_eq!(h.launcher.times_launched(GENERATE), 1);
    assert_eq!(h.launcher.times_launched(INJECT), 1);
    assert_eq!(h.console.lines().last().map(String::as_str), Some(messages::RUN_FINISHED));
}

#[tokio::test]
async fn test_event_sequence_for_degraded_run() {
    let h = harness(
        CiDetection::present(),
        RecordingLauncher::new().respond(INJECT, ScriptedExit::Code(4)),
    );

    h.orchestrator.run().await.unwrap();

    assert_eq!(
        h.events.event_types(),
        vec![
            "pipeline.started",
            "stage.started",
            "stage.completed",
            "stage.started",
            "stage.completed",
            "stage.started",
            "stage.failed",
            "pipeline.completed",
        ]
    );
    let failed = h.events.events_of_type("stage.failed");
    let data = failed[0].1.as_ref().unwrap();
    assert_eq!(data["stage"], "inject");
    assert_eq!(data["exit_code"], 4);
    assert_eq!(data["policy"], "continue");
}

#[cfg(unix)]
mod real_processes {
    use super::{CiDetection, CommandSpec, Console, Orchestrator, RunConfig, GENERATE_STAGE};
    use pretty_assertions::assert_eq;
    use std::path::Path;

    fn script(dir: &Path, name: &str, body: &str) -> CommandSpec {
        let path = dir.join(name);
        std::fs::write(&path, body).unwrap();
        CommandSpec::new("sh").arg(path.to_string_lossy())
    }

    fn config(dir: &Path, install: &str, generate: &str, inject: &str) -> RunConfig {
        RunConfig::new(CiDetection::present())
            .with_installer(script(dir, "install.sh", install))
            .with_generator(script(dir, "generate.sh", generate))
            .with_injector(script(dir, "inject.sh", inject))
    }

    fn orchestrator(config: RunConfig) -> Orchestrator {
        Orchestrator::new(config).with_console(Console::sink())
    }

    #[tokio::test]
    async fn test_real_scripts_run_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("order.txt");
        let append = |step: &str| format!("echo {step} >> '{}'\n", marker.display());

        let config = config(
            dir.path(),
            &append("install"),
            &format!("{}exit 1\n", append("generate")),
            &append("inject"),
        );

        let report = orchestrator(config).run().await.unwrap();

        assert_eq!(report.exit_code(), 0);
        assert_eq!(report.failed(), vec![GENERATE_STAGE]);
        let order = std::fs::read_to_string(&marker).unwrap();
        assert_eq!(order, "install\ngenerate\ninject\n");
    }

    #[tokio::test]
    async fn test_real_install_failure_stops_run() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("ran.txt");
        let touch = format!("touch '{}'\n", marker.display());

        let config = config(dir.path(), "exit 3\n", &touch, &touch);

        let err = orchestrator(config).run().await.unwrap_err();

        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("exit status 3"));
        assert!(!marker.exists());
    }
}
