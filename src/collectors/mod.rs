pub mod system;

use thiserror::Error;

/// Instantaneous host utilization, all values in percent of capacity.
#[derive(Debug, Clone, Copy)]
pub struct SystemMetrics {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub disk_percent: f64,
}

/// A host metric that could not be read. Never substituted with a default;
/// the caller aborts the run.
#[derive(Debug, Error)]
pub enum MetricError {
    #[error("the host reported no CPUs")]
    CpuUnavailable,
    #[error("the host reported zero total memory")]
    MemoryUnavailable,
    #[error("no disk mounted at {mount}")]
    MountNotFound { mount: String },
    #[error("disk mounted at {mount} reports zero capacity")]
    DiskUnavailable { mount: String },
}
