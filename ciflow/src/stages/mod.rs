//! Stage trait and implementations.
//!
//! Stages are the units of work in a ciflow pipeline. Production stages are
//! [`CommandStage`]s wrapping one external process each.

mod command;

pub use command::CommandStage;

use crate::context::StageContext;
use crate::core::StageOutput;
use async_trait::async_trait;
use std::fmt::Debug;

/// Trait for pipeline stages.
#[async_trait]
pub trait Stage: Send + Sync + Debug {
    /// Returns the name of the stage.
    fn name(&self) -> &str;

    /// Executes the stage.
    ///
    /// Failures are reported through the returned [`StageOutput`], never
    /// by panicking; the runner decides what a failure means.
    async fn execute(&self, ctx: &StageContext) -> StageOutput;
}
