//! Pipeline building and execution.
//!
//! This module provides:
//! - Stage specifications with per-stage failure policies
//! - Pipeline builder with validation
//! - The sequential runner and its run report
//! - The standard CI pipeline (install, generate, inject)

mod builder;
mod failure_tolerance;
#[cfg(test)]
mod integration_tests;
mod runner;
mod spec;
pub mod standard;

pub use builder::PipelineBuilder;
pub use failure_tolerance::{FailurePolicy, RunReport, StageRecord};
pub use runner::Pipeline;
pub use spec::StageSpec;
