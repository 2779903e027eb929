use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;
use metricsx_core::error::{MetricsError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsxConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub metrics: MetricsSection,
}

impl MetricsxConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MetricsError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.metrics.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|_| {
            MetricsError::BadRequest(format!("server.listen must be a valid SocketAddr: {}", self.listen))
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    /// Register `process.*` gauges at boot.
    #[serde(default = "default_true")]
    pub process_gauges: bool,

    /// Time every inbound request under `resources/...`.
    #[serde(default = "default_true")]
    pub resource_timing: bool,

    #[serde(default = "default_reservoir_size")]
    pub reservoir_size: usize,

    /// 0 disables the periodic reporter.
    #[serde(default)]
    pub report_interval_ms: u64,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            process_gauges: true,
            resource_timing: true,
            reservoir_size: default_reservoir_size(),
            report_interval_ms: 0,
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=1_000_000).contains(&self.reservoir_size) {
            return Err(MetricsError::BadRequest(
                "metrics.reservoir_size must be between 1 and 1000000".into(),
            ));
        }
        if self.report_interval_ms != 0 && !(1000..=3_600_000).contains(&self.report_interval_ms) {
            return Err(MetricsError::BadRequest(
                "metrics.report_interval_ms must be 0 or between 1000 and 3600000".into(),
            ));
        }
        Ok(())
    }

    pub fn report_interval(&self) -> Option<Duration> {
        (self.report_interval_ms > 0).then(|| Duration::from_millis(self.report_interval_ms))
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_true() -> bool {
    true
}
fn default_reservoir_size() -> usize {
    metricsx_core::metric::DEFAULT_RESERVOIR_SIZE
}
