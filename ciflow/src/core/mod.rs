//! Core domain model types for ciflow.
//!
//! This module contains the fundamental types used throughout the crate:
//! - Stage status and kind enums
//! - Stage output type with factory methods

mod output;
mod status;

pub use output::StageOutput;
pub use status::{StageKind, StageStatus};
