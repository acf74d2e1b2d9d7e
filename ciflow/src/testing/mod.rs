//! Testing utilities for ciflow pipelines.
//!
//! This module provides:
//! - A process launcher that records invocations instead of spawning
//! - Mock stages with scripted outputs
//! - A shared in-memory writer for capturing console output

mod mocks;

pub use mocks::{CallLog, MockStage, RecordingLauncher, ScriptedExit, SharedBuffer};
