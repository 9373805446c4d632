use crate::collectors::{MetricError, SystemMetrics};
use std::path::Path;
use std::time::Duration;
use sysinfo::{CpuExt, DiskExt, System, SystemExt};
use tracing::debug;

/// Window between the two CPU refreshes. A single refresh only reports usage
/// since the previous one, so the read deliberately blocks for this long.
const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

pub async fn read_system_metrics(
    system: &mut System,
    root_mount: &str,
) -> Result<SystemMetrics, MetricError> {
    system.refresh_cpu();
    tokio::time::sleep(CPU_SAMPLE_WINDOW).await;
    system.refresh_cpu();
    let cpu_percent = average_cpu_usage(system)?;

    system.refresh_memory();
    let memory_percent = percent_used(system.used_memory(), system.total_memory())
        .ok_or(MetricError::MemoryUnavailable)?;

    system.refresh_disks_list();
    system.refresh_disks();
    let disk_percent = root_disk_usage(system, root_mount)?;

    debug!(
        cpu_percent,
        memory_percent, disk_percent, "host metrics collected"
    );

    Ok(SystemMetrics {
        cpu_percent,
        memory_percent,
        disk_percent,
    })
}

fn average_cpu_usage(system: &System) -> Result<f64, MetricError> {
    let cpus = system.cpus();
    if cpus.is_empty() {
        return Err(MetricError::CpuUnavailable);
    }
    let sum: f32 = cpus.iter().map(|c| c.cpu_usage()).sum();
    Ok(clamp_percent(sum as f64 / cpus.len() as f64))
}

fn root_disk_usage(system: &System, root_mount: &str) -> Result<f64, MetricError> {
    let disk = system
        .disks()
        .iter()
        .find(|d| d.mount_point() == Path::new(root_mount))
        .ok_or_else(|| MetricError::MountNotFound {
            mount: root_mount.to_string(),
        })?;

    let total = disk.total_space();
    let used = total.saturating_sub(disk.available_space());
    percent_used(used, total).ok_or_else(|| MetricError::DiskUnavailable {
        mount: root_mount.to_string(),
    })
}

fn percent_used(used: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(clamp_percent(used as f64 / total as f64 * 100.0))
}

fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}
