//! The standard CI pipeline: install, generate, inject.

use super::{Pipeline, PipelineBuilder, StageSpec};
use crate::config::RunConfig;
use crate::console::messages;
use crate::core::StageKind;
use crate::errors::PipelineValidationError;
use crate::process::ProcessLauncher;
use crate::stages::CommandStage;
use std::sync::Arc;

/// Dependency install stage name.
pub const INSTALL_STAGE: &str = "install";
/// Content generator stage name.
pub const GENERATE_STAGE: &str = "generate";
/// Affiliate injector stage name.
pub const INJECT_STAGE: &str = "inject";

/// Builds the pipeline for `config`.
///
/// The install stage is fatal. The two content stages continue on failure,
/// since "nothing new to generate" is a normal outcome for the generator.
pub fn ci_pipeline(
    config: &RunConfig,
    launcher: Arc<dyn ProcessLauncher>,
) -> Result<Pipeline, PipelineValidationError> {
    let install = CommandStage::new(INSTALL_STAGE, config.installer.clone(), Arc::clone(&launcher));
    let generate = CommandStage::new(GENERATE_STAGE, config.generator.clone(), Arc::clone(&launcher));
    let inject = CommandStage::new(INJECT_STAGE, config.injector.clone(), launcher);

    PipelineBuilder::new(&config.pipeline_name)
        .with_stage_spec(
            StageSpec::new(INSTALL_STAGE, Arc::new(install))
                .with_kind(StageKind::Install)
                .with_announcement(messages::INSTALL_ANNOUNCE)
                .with_failure_prefix(messages::INSTALL_FAILED),
        )?
        .with_stage_spec(
            StageSpec::new(GENERATE_STAGE, Arc::new(generate))
                .continue_on_failure()
                .with_announcement(messages::GENERATOR_ANNOUNCE)
                .with_failure_prefix(messages::GENERATOR_FAILED),
        )?
        .with_stage_spec(
            StageSpec::new(INJECT_STAGE, Arc::new(inject))
                .continue_on_failure()
                .with_announcement(messages::INJECTOR_ANNOUNCE)
                .with_failure_prefix(messages::INJECTOR_FAILED),
        )?
        .build()
}
