//! # Ciflow
//!
//! A small orchestration shim for continuous-integration jobs.
//!
//! A run goes through a fixed sequence:
//!
//! - **Environment guard**: refuse to run outside the expected CI provider
//! - **Dependency install**: one package-manager call, fatal on failure
//! - **Content stages**: the generator and the affiliate injector, each
//!   allowed to fail without stopping the run
//!
//! The sequence is expressed as a [`pipeline::Pipeline`] of named stages,
//! each with its own [`pipeline::FailurePolicy`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ciflow::prelude::*;
//!
//! let config = RunConfig::from_env();
//! let orchestrator = Orchestrator::new(config);
//! let report = orchestrator.run().await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod app;
pub mod config;
pub mod console;
pub mod context;
pub mod core;
pub mod errors;
pub mod events;
pub mod guard;
pub mod pipeline;
pub mod process;
pub mod stages;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::app::Orchestrator;
    pub use crate::config::{CiDetection, RunConfig};
    pub use crate::console::Console;
    pub use crate::context::{PipelineContext, RunIdentity, StageContext};
    pub use crate::core::{StageKind, StageOutput, StageStatus};
    pub use crate::errors::{CiflowError, GuardError, PipelineValidationError};
    pub use crate::events::{EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::guard::EnvironmentGuard;
    pub use crate::pipeline::{
        FailurePolicy, Pipeline, PipelineBuilder, RunReport, StageRecord, StageSpec,
    };
    pub use crate::process::{CommandSpec, ExitOutcome, ProcessLauncher, SystemLauncher};
    pub use crate::stages::{CommandStage, Stage};
}
