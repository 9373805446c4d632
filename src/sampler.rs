use crate::collectors::{self, MetricError};
use crate::probe::{ProbeTransport, Prober};
use crate::record::Sample;
use chrono::Local;
use sysinfo::{System, SystemExt};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of samples for the scheduler. The production implementation reads
/// the real host; tests drive the loop with a canned one.
#[allow(async_fn_in_trait)]
pub trait MetricSource {
    async fn sample(&mut self) -> Result<Sample, MetricError>;
}

/// Composes timestamp, host metrics, and the connectivity probe into one
/// immutable `Sample` per call.
pub struct Sampler<T> {
    system: System,
    prober: Prober<T>,
    root_mount: String,
}

impl<T: ProbeTransport> Sampler<T> {
    pub fn new(prober: Prober<T>, root_mount: impl Into<String>) -> Self {
        Self {
            system: System::new(),
            prober,
            root_mount: root_mount.into(),
        }
    }
}

impl<T: ProbeTransport> MetricSource for Sampler<T> {
    async fn sample(&mut self) -> Result<Sample, MetricError> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let metrics =
            collectors::system::read_system_metrics(&mut self.system, &self.root_mount).await?;
        let probe = self.prober.check().await;
        Ok(Sample::new(
            timestamp,
            metrics.cpu_percent,
            metrics.memory_percent,
            metrics.disk_percent,
            probe.status,
            probe.latency_ms,
        ))
    }
}
