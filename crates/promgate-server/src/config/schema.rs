use std::net::SocketAddr;

use serde::Deserialize;
use promgate_core::error::{PromgateError, Result};
use promgate_core::metrics::validate_buckets;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub app: AppSection,

    #[serde(default)]
    pub metrics: MetricsSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            app: AppSection::default(),
            metrics: MetricsSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PromgateError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.metrics.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
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
        self.listen.parse().map_err(|e| {
            PromgateError::BadRequest(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:80".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_app_version")]
    pub version: String,

    #[serde(default = "default_greeting")]
    pub greeting: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            version: default_app_version(),
            greeting: default_greeting(),
        }
    }
}

fn default_title() -> String {
    "promgate".into()
}
fn default_app_version() -> String {
    "1.0.0".into()
}
fn default_greeting() -> String {
    "Hello DevOps!".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_duration_buckets")]
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            duration_buckets: default_duration_buckets(),
        }
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        validate_buckets(&self.duration_buckets).map_err(|e| match e {
            PromgateError::InvalidMetric(msg) => {
                PromgateError::BadRequest(format!("metrics.duration_buckets: {msg}"))
            }
            other => other,
        })
    }
}

fn default_enabled() -> bool {
    true
}

/// Request duration buckets, seconds.
pub const DEFAULT_DURATION_BUCKETS: [f64; 14] = [
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

fn default_duration_buckets() -> Vec<f64> {
    DEFAULT_DURATION_BUCKETS.to_vec()
}
