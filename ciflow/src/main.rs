use anyhow::Context;
use ciflow::prelude::*;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ciflow=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;

    let config = RunConfig::from_env();
    let outcome = runtime.block_on(Orchestrator::new(config).run());

    Ok(match outcome {
        Ok(report) => {
            tracing::debug!(
                completed = ?report.completed(),
                failed = ?report.failed(),
                "Exiting"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            if let Some(report) = err.report() {
                tracing::debug!(skipped = ?report.skipped(), "Run aborted");
            }
            tracing::error!(error = %err, "Run failed");
            ExitCode::from(err.exit_code())
        }
    })
}
