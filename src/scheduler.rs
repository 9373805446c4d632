use crate::collectors::MetricError;
use crate::config::Config;
use crate::logfile::{LogError, LogFile};
use crate::sampler::MetricSource;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// A fatal failure tagged with the iteration it happened in. Only the probe
/// absorbs its own errors; everything else aborts the run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("iteration {iteration}: failed to read host metrics: {source}")]
    Metric {
        iteration: u32,
        source: MetricError,
    },
    #[error("iteration {iteration}: failed to append to the log: {source}")]
    Log { iteration: u32, source: LogError },
}

/// Sequential sampling loop: sample, append, notify, sleep. The sleep runs
/// after every iteration, the final one included.
pub async fn run(
    cfg: &Config,
    source: &mut impl MetricSource,
    log: &LogFile,
) -> Result<(), RunError> {
    let interval = Duration::from_secs(cfg.interval_secs);
    for iteration in 1..=cfg.iterations {
        let sample = source
            .sample()
            .await
            .map_err(|source| RunError::Metric { iteration, source })?;
        log.append(&sample)
            .map_err(|source| RunError::Log { iteration, source })?;

        println!("Logged: {sample}");
        info!(
            iteration,
            total = cfg.iterations,
            path = %log.path().display(),
            "sample appended"
        );

        tokio::time::sleep(interval).await;
    }
    Ok(())
}
