//! Context management for pipeline execution.
//!
//! This module provides:
//! - Run identity for correlating log lines of one run
//! - The pipeline-wide context shared by every stage
//! - The per-stage context handed to [`Stage::execute`](crate::stages::Stage::execute)

mod execution;
mod identity;

pub use execution::{PipelineContext, StageContext};
pub use identity::RunIdentity;
