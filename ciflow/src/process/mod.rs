//! Subprocess boundary.
//!
//! This module provides:
//! - [`CommandSpec`], a program plus its ordered arguments
//! - [`ExitOutcome`], how a finished process ended
//! - [`ProcessLauncher`], the seam between stages and the OS, with
//!   [`SystemLauncher`] as the production implementation

mod command;
mod launcher;

pub use command::CommandSpec;
pub use launcher::{ExitOutcome, LaunchError, ProcessLauncher, SystemLauncher};
