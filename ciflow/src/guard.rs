//! Environment guard.
//!
//! Gate run before anything else: outside the expected CI provider no
//! process is launched at all.

use crate::config::{CiDetection, CI_SENTINEL};
use crate::errors::GuardError;
use tracing::debug;

/// Checks that the run happens inside the CI provider.
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentGuard<'a> {
    ci: &'a CiDetection,
}

impl<'a> EnvironmentGuard<'a> {
    /// Creates a guard over a detection result.
    #[must_use]
    pub const fn new(ci: &'a CiDetection) -> Self {
        Self { ci }
    }

    /// Passes only when the detection variable held the sentinel exactly.
    ///
    /// # Errors
    ///
    /// Returns a [`GuardError`] naming the variable and what was observed.
    pub fn check(&self) -> Result<(), GuardError> {
        if self.ci.detected {
            debug!(variable = %self.ci.variable, "CI environment detected");
            return Ok(());
        }

        Err(GuardError::new(
            &self.ci.variable,
            CI_SENTINEL,
            self.ci.observed.clone(),
        ))
    }
}
