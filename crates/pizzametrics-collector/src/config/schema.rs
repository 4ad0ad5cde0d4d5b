use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use pizzametrics_core::error::{PizzaMetricsError, Result};
use pizzametrics_core::protocol::line::validate_tag;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectorConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    pub metrics: MetricsSection,
}

impl CollectorConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PizzaMetricsError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
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
        if self.listen.parse::<std::net::SocketAddr>().is_err() {
            return Err(PizzaMetricsError::Config(format!(
                "server.listen must be a valid socket address: {}",
                self.listen
            )));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:3000".into()
}

/// Ingestion endpoint and reporting cadence.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    pub url: String,
    pub user_id: String,
    pub api_key: String,
    pub source: String,

    #[serde(default = "default_report_interval_ms")]
    pub report_interval_ms: u64,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

// api_key stays out of logs.
impl fmt::Debug for MetricsSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricsSection")
            .field("url", &self.url)
            .field("user_id", &self.user_id)
            .field("api_key", &"<redacted>")
            .field("source", &self.source)
            .field("report_interval_ms", &self.report_interval_ms)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

impl MetricsSection {
    pub fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(PizzaMetricsError::Config(
                "metrics.url must start with http:// or https://".into(),
            ));
        }
        if self.user_id.is_empty() || self.api_key.is_empty() {
            return Err(PizzaMetricsError::Config(
                "metrics.user_id and metrics.api_key must not be empty".into(),
            ));
        }
        validate_tag("metrics.source", &self.source)
            .map_err(|e| PizzaMetricsError::Config(e.to_string()))?;
        if !(100..=3_600_000).contains(&self.report_interval_ms) {
            return Err(PizzaMetricsError::Config(
                "metrics.report_interval_ms must be between 100 and 3600000".into(),
            ));
        }
        if !(100..=60_000).contains(&self.request_timeout_ms) {
            return Err(PizzaMetricsError::Config(
                "metrics.request_timeout_ms must be between 100 and 60000".into(),
            ));
        }
        Ok(())
    }

    pub(crate) fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("PIZZAMETRICS_URL") {
            self.url = v;
        }
        if let Some(v) = lookup("PIZZAMETRICS_USER_ID") {
            self.user_id = v;
        }
        if let Some(v) = lookup("PIZZAMETRICS_API_KEY") {
            self.api_key = v;
        }
        if let Some(v) = lookup("PIZZAMETRICS_SOURCE") {
            self.source = v;
        }
        if let Some(v) = lookup("PIZZAMETRICS_REPORT_INTERVAL_MS") {
            self.report_interval_ms = v.parse().map_err(|_| {
                PizzaMetricsError::Config(format!(
                    "PIZZAMETRICS_REPORT_INTERVAL_MS must be an integer: {v}"
                ))
            })?;
        }
        Ok(())
    }

    pub fn report_interval(&self) -> Duration {
        Duration::from_millis(self.report_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Value of the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}:{}", self.user_id, self.api_key)
    }
}

fn default_report_interval_ms() -> u64 {
    10_000
}
fn default_request_timeout_ms() -> u64 {
    5_000
}
