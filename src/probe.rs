use crate::record::{PingStatus, LATENCY_UNKNOWN};
use reqwest::Client;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

/// What the transport observed for one GET against the probe target.
/// `elapsed` is `None` when the transfer succeeded but no usable timing was
/// reported; reachability and latency fail independently.
#[derive(Debug, Clone, Copy)]
pub struct TransportReport {
    pub success: bool,
    pub elapsed: Option<Duration>,
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// The HTTP-client capability behind the probe. Tests substitute a fake so
/// no real network call is spawned.
#[allow(async_fn_in_trait)]
pub trait ProbeTransport {
    async fn fetch(&self, url: &str) -> Result<TransportReport, TransportError>;
}

/// Production transport over `reqwest` with separate connection and total
/// transfer timeouts.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(connect_timeout: Duration, total_timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("pulselog/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(connect_timeout)
            .timeout(total_timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl ProbeTransport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<TransportReport, TransportError> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();
        // Drain the body so the measurement covers the whole transfer.
        let _ = response.bytes().await?;
        Ok(TransportReport {
            success: status.is_success(),
            elapsed: Some(start.elapsed()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeResult {
    pub status: PingStatus,
    pub latency_ms: f64,
}

/// Bounded-time reachability check against a fixed target. `check` never
/// fails: every transport error, failure status, or watchdog expiry is
/// absorbed into `(Down, -1)`.
pub struct Prober<T> {
    transport: T,
    url: String,
    watchdog: Duration,
}

impl<T: ProbeTransport> Prober<T> {
    pub fn new(transport: T, url: impl Into<String>, watchdog: Duration) -> Self {
        Self {
            transport,
            url: url.into(),
            watchdog,
        }
    }

    pub async fn check(&self) -> ProbeResult {
        match tokio::time::timeout(self.watchdog, self.transport.fetch(&self.url)).await {
            Ok(Ok(report)) if report.success => {
                let latency_ms = match report.elapsed {
                    Some(elapsed) => round_to_tenth_ms(elapsed),
                    // Reachability confirmed even though timing is unknown.
                    None => LATENCY_UNKNOWN,
                };
                ProbeResult {
                    status: PingStatus::Up,
                    latency_ms,
                }
            }
            Ok(Ok(_)) => {
                debug!(url = %self.url, "probe target answered with a failure status");
                Self::down()
            }
            Ok(Err(err)) => {
                warn!(url = %self.url, error = %err, "probe transport failed");
                Self::down()
            }
            Err(_elapsed) => {
                warn!(url = %self.url, watchdog = ?self.watchdog, "probe watchdog expired");
                Self::down()
            }
        }
    }

    fn down() -> ProbeResult {
        ProbeResult {
            status: PingStatus::Down,
            latency_ms: LATENCY_UNKNOWN,
        }
    }
}

fn round_to_tenth_ms(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 1000.0 * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeTransport {
        result: Result<TransportReport, TransportError>,
    }

    impl ProbeTransport for FakeTransport {
        async fn fetch(&self, _url: &str) -> Result<TransportReport, TransportError> {
            self.result.clone()
        }
    }

    struct StalledTransport;

    impl ProbeTransport for StalledTransport {
        async fn fetch(&self, _url: &str) -> Result<TransportReport, TransportError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(TransportReport {
                success: true,
                elapsed: Some(Duration::from_secs(3600)),
            })
        }
    }

    fn prober<T: ProbeTransport>(transport: T) -> Prober<T> {
        Prober::new(transport, "http://probe.test", Duration::from_secs(6))
    }

    #[tokio::test]
    async fn successful_transfer_reports_up_with_rounded_latency() {
        let transport = FakeTransport {
            result: Ok(TransportReport {
                success: true,
                elapsed: Some(Duration::from_micros(23_449)),
            }),
        };
        let result = prober(transport).check().await;
        assert_eq!(result.status, PingStatus::Up);
        assert_eq!(result.latency_ms, 23.4);
    }

    #[tokio::test]
    async fn success_without_timing_reports_up_with_unknown_latency() {
        let transport = FakeTransport {
            result: Ok(TransportReport {
                success: true,
                elapsed: None,
            }),
        };
        let result = prober(transport).check().await;
        assert_eq!(result.status, PingStatus::Up);
        assert_eq!(result.latency_ms, LATENCY_UNKNOWN);
    }

    #[tokio::test]
    async fn failure_status_reports_down() {
        let transport = FakeTransport {
            result: Ok(TransportReport {
                success: false,
                elapsed: Some(Duration::from_millis(12)),
            }),
        };
        let result = prober(transport).check().await;
        assert_eq!(result.status, PingStatus::Down);
        assert_eq!(result.latency_ms, LATENCY_UNKNOWN);
    }

    #[tokio::test]
    async fn transport_error_reports_down() {
        let transport = FakeTransport {
            result: Err(TransportError::new("dns failure")),
        };
        let result = prober(transport).check().await;
        assert_eq!(result.status, PingStatus::Down);
        assert_eq!(result.latency_ms, LATENCY_UNKNOWN);
    }

    #[tokio::test(start_paused = true)]
    async fn watchdog_bounds_a_stalled_transport() {
        let started = tokio::time::Instant::now();
        let result = prober(StalledTransport).check().await;
        assert_eq!(result.status, PingStatus::Down);
        assert_eq!(result.latency_ms, LATENCY_UNKNOWN);
        assert_eq!(started.elapsed(), Duration::from_secs(6));
    }

    #[test]
    fn latency_rounds_to_one_decimal_place() {
        assert_eq!(round_to_tenth_ms(Duration::from_micros(5_678_901)), 5678.9);
        assert_eq!(round_to_tenth_ms(Duration::from_millis(5000)), 5000.0);
        assert_eq!(round_to_tenth_ms(Duration::ZERO), 0.0);
    }
}
