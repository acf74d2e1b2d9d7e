//! Run configuration.
//!
//! The only value read from the environment is the CI detection variable.
//! It is read once, into a [`RunConfig`] that is passed explicitly to the
//! [`Orchestrator`](crate::app::Orchestrator) and never mutated. The
//! commands are fixed defaults.

use crate::process::CommandSpec;
use serde::{Deserialize, Serialize};

/// Variable set by the CI provider.
pub const CI_ENV_VAR: &str = "GITHUB_ACTIONS";
/// The exact value that identifies the CI provider.
pub const CI_SENTINEL: &str = "true";

/// Default pipeline name, used in logs and events.
pub const DEFAULT_PIPELINE_NAME: &str = "content-publish";

/// Package manager program.
pub const PACKAGE_MANAGER: &str = "pip";
/// Packages installed before any script runs, in install order.
pub const REQUIRED_PACKAGES: [&str; 4] = ["pandas", "openai", "requests", "python-slugify"];

/// Interpreter program for the content scripts.
pub const INTERPRETER: &str = "python";
/// Content generator script, relative to the working directory.
pub const GENERATOR_SCRIPT: &str = "content-engine/generator.py";
/// Affiliate-link injector script, relative to the working directory.
pub const INJECTOR_SCRIPT: &str = "inject_affiliates.py";

/// Result of looking for the CI provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiDetection {
    /// The variable that was consulted.
    pub variable: String,
    /// Its value, if set.
    pub observed: Option<String>,
    /// True only when `observed` equals the sentinel exactly.
    pub detected: bool,
}

impl CiDetection {
    /// Builds a detection result from the observed value of [`CI_ENV_VAR`].
    #[must_use]
    pub fn from_observed(observed: Option<String>) -> Self {
        let detected = observed.as_deref() == Some(CI_SENTINEL);
        Self {
            variable: CI_ENV_VAR.to_string(),
            observed,
            detected,
        }
    }

    /// A detection result for a run inside CI.
    #[must_use]
    pub fn present() -> Self {
        Self::from_observed(Some(CI_SENTINEL.to_string()))
    }

    /// A detection result for a run outside CI.
    #[must_use]
    pub fn absent() -> Self {
        Self::from_observed(None)
    }
}

/// Everything a run needs, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Pipeline name for logs and events.
    pub pipeline_name: String,
    /// CI detection result.
    pub ci: CiDetection,
    /// Dependency install command.
    pub installer: CommandSpec,
    /// Content generator command.
    pub generator: CommandSpec,
    /// Affiliate injector command.
    pub injector: CommandSpec,
}

impl RunConfig {
    /// Creates a configuration with the default commands.
    #[must_use]
    pub fn new(ci: CiDetection) -> Self {
        Self {
            pipeline_name: DEFAULT_PIPELINE_NAME.to_string(),
            ci,
            installer: Self::default_installer(),
            generator: Self::default_generator(),
            injector: Self::default_injector(),
        }
    }

    /// Reads the CI detection variable from the process environment.
    ///
    /// A value that is not valid unicode counts as unset.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the CI detection variable through `lookup`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self::new(CiDetection::from_observed(lookup(CI_ENV_VAR)))
    }

    /// `pip install pandas openai requests python-slugify`
    #[must_use]
    pub fn default_installer() -> CommandSpec {
        CommandSpec::new(PACKAGE_MANAGER)
            .arg("install")
            .args(REQUIRED_PACKAGES)
    }

    /// `python content-engine/generator.py`
    #[must_use]
    pub fn default_generator() -> CommandSpec {
        CommandSpec::new(INTERPRETER).arg(GENERATOR_SCRIPT)
    }

    /// `python inject_affiliates.py`
    #[must_use]
    pub fn default_injector() -> CommandSpec {
        CommandSpec::new(INTERPRETER).arg(INJECTOR_SCRIPT)
    }

    /// Sets the pipeline name.
    #[must_use]
    pub fn with_pipeline_name(mut self, name: impl Into<String>) -> Self {
        self.pipeline_name = name.into();
        self
    }

    /// Replaces the install command.
    #[must_use]
    pub fn with_installer(mut self, command: CommandSpec) -> Self {
        self.installer = command;
        self
    }

    /// Replaces the generator command.
    #[must_use]
    pub fn with_generator(mut self, command: CommandSpec) -> Self {
        self.generator = command;
        self
    }

    /// Replaces the injector command.
    #[must_use]
    pub fn with_injector(mut self, command: CommandSpec) -> Self {
        self.injector = command;
        self
    }
}
