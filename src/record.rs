use std::fmt;

/// Latency placeholder when the probe could not produce a round-trip time,
/// either because the target was down or because the transport confirmed
/// reachability without a usable timing.
pub const LATENCY_UNKNOWN: f64 = -1.0;

/// Header row written once when the log file is created.
pub const CSV_HEADER: [&str; 6] = [
    "Timestamp",
    "CPU",
    "Memory",
    "Disk",
    "Ping_Status",
    "Ping_ms",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingStatus {
    Up,
    Down,
}

impl fmt::Display for PingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PingStatus::Up => f.write_str("UP"),
            PingStatus::Down => f.write_str("DOWN"),
        }
    }
}

/// One observation of host health. Immutable once constructed; produced by
/// the sampler and handed to the log writer exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub timestamp: String,
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub disk_percent: f64,
    pub ping_status: PingStatus,
    pub ping_ms: f64,
}

impl Sample {
    /// A `Down` status always carries the unknown-latency sentinel, whatever
    /// the caller passed in.
    pub fn new(
        timestamp: String,
        cpu_percent: f64,
        memory_percent: f64,
        disk_percent: f64,
        ping_status: PingStatus,
        ping_ms: f64,
    ) -> Self {
        let ping_ms = match ping_status {
            PingStatus::Up => ping_ms,
            PingStatus::Down => LATENCY_UNKNOWN,
        };
        Self {
            timestamp,
            cpu_percent,
            memory_percent,
            disk_percent,
            ping_status,
            ping_ms,
        }
    }

    /// The six CSV fields in header order.
    pub fn fields(&self) -> [String; 6] {
        [
            self.timestamp.clone(),
            self.cpu_percent.to_string(),
            self.memory_percent.to_string(),
            self.disk_percent.to_string(),
            self.ping_status.to_string(),
            self.ping_ms.to_string(),
        ]
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}, {}, {}]",
            self.timestamp,
            self.cpu_percent,
            self.memory_percent,
            self.disk_percent,
            self.ping_status,
            self.ping_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_status_forces_unknown_latency() {
        let sample = Sample::new(
            "2024-01-01 00:00:00".to_string(),
            10.0,
            20.0,
            30.0,
            PingStatus::Down,
            42.5,
        );
        assert_eq!(sample.ping_ms, LATENCY_UNKNOWN);
    }

    #[test]
    fn up_status_keeps_measured_latency() {
        let sample = Sample::new(
            "2024-01-01 00:00:00".to_string(),
            10.0,
            20.0,
            30.0,
            PingStatus::Up,
            23.4,
        );
        assert_eq!(sample.ping_ms, 23.4);
    }

    #[test]
    fn fields_follow_header_order() {
        let sample = Sample::new(
            "2024-01-01 00:00:00".to_string(),
            12.3,
            45.6,
            78.9,
            PingStatus::Up,
            23.4,
        );
        assert_eq!(
            sample.fields(),
            [
                "2024-01-01 00:00:00",
                "12.3",
                "45.6",
                "78.9",
                "UP",
                "23.4"
            ]
        );
    }

    #[test]
    fn display_renders_notice_body() {
        let sample = Sample::new(
            "2024-01-01 00:00:00".to_string(),
            12.3,
            45.6,
            78.9,
            PingStatus::Down,
            0.0,
        );
        assert_eq!(
            sample.to_string(),
            "[2024-01-01 00:00:00, 12.3, 45.6, 78.9, DOWN, -1]"
        );
    }
}
