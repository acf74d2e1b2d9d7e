//! User-facing console output.
//!
//! Console lines are the messages a person reads in the CI log. They are
//! kept apart from `tracing` diagnostics: lines go to stdout, interleaved
//! with the children's own output, and are flushed before any child starts.

use parking_lot::Mutex;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;
use tracing::debug;

/// The localized message catalogue.
pub mod messages {
    /// Printed when the run is not inside GitHub Actions.
    pub const GUARD_REJECTED: &str = "❌ يجب تشغيل هذا السكربت ضمن بيئة GitHub Actions.";
    /// Printed before the dependency install.
    pub const INSTALL_ANNOUNCE: &str = "⚙️ تثبيت الحزم المطلوبة (pandas, openai, python-slugify)...";
    /// Prefix for an install failure; the error text follows.
    pub const INSTALL_FAILED: &str = "❌ فشل في تثبيت حزم Python";
    /// Printed before the generator runs.
    pub const GENERATOR_ANNOUNCE: &str = "🚀 بدء عملية توليد المحتوى...";
    /// Prefix for a generator failure.
    pub const GENERATOR_FAILED: &str = "❌ فشل في تشغيل generator.py";
    /// Printed before the affiliate injector runs.
    pub const INJECTOR_ANNOUNCE: &str = "🔗 بدء عملية حقن روابط الأفلييت...";
    /// Prefix for an injector failure.
    pub const INJECTOR_FAILED: &str = "❌ فشل في تشغيل inject_affiliates.py";
    /// Printed once every stage has been attempted.
    pub const RUN_FINISHED: &str = "✅ اكتملت عمليات التوليد والحقن بنجاح.";

    /// Joins a failure prefix and the error text.
    #[must_use]
    pub fn failure(prefix: &str, error: &str) -> String {
        format!("{prefix}: {error}")
    }
}

/// A line-oriented writer shared by the orchestrator and the runner.
#[derive(Clone)]
pub struct Console {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Console {
    /// A console writing to the process's stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    /// A console that discards everything.
    #[must_use]
    pub fn sink() -> Self {
        Self::from_writer(io::sink())
    }

    /// A console writing to any writer.
    #[must_use]
    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Writes one line and flushes.
    ///
    /// Write errors are logged and swallowed; losing a log line must not
    /// change the outcome of the run.
    pub fn line(&self, message: &str) {
        let mut out = self.out.lock();
        if let Err(err) = writeln!(out, "{message}").and_then(|()| out.flush()) {
            debug!(error = %err, "Failed to write console line");
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}
