//! Pipeline builder with validation.

use super::{Pipeline, StageSpec};
use crate::errors::PipelineValidationError;
use crate::stages::Stage;
use std::collections::HashSet;
use std::sync::Arc;

/// Builder for creating validated pipelines.
///
/// Stages run in the order they are added.
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    name: String,
    stages: Vec<StageSpec>,
    names: HashSet<String>,
}

impl PipelineBuilder {
    /// Creates a new pipeline builder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
            names: HashSet::new(),
        }
    }

    /// Adds a stage with the default (fatal) failure policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or already used.
    pub fn stage(
        mut self,
        name: impl Into<String>,
        runner: Arc<dyn Stage>,
    ) -> Result<Self, PipelineValidationError> {
        self.add_stage_spec(StageSpec::new(name, runner))?;
        Ok(self)
    }

    /// Adds a fully described stage.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or already used.
    pub fn add_stage_spec(&mut self, spec: StageSpec) -> Result<(), PipelineValidationError> {
        spec.validate()?;

        if !self.names.insert(spec.name.clone()) {
            return Err(PipelineValidationError::duplicate_stage(&spec.name));
        }

        self.stages.push(spec);
        Ok(())
    }

    /// Adds a fully described stage, consuming and returning the builder.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or already used.
    pub fn with_stage_spec(mut self, spec: StageSpec) -> Result<Self, PipelineValidationError> {
        self.add_stage_spec(spec)?;
        Ok(self)
    }

    /// Builds the pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the builder has no stages.
    pub fn build(self) -> Result<Pipeline, PipelineValidationError> {
        if self.stages.is_empty() {
            return Err(PipelineValidationError::empty(&self.name));
        }

        Ok(Pipeline::new(self.name, self.stages))
    }
}
