use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use pizzametrics_core::error::{PizzaMetricsError, Result};

use crate::config::MetricsSection;

/// Destination for formatted lines. One call per line; no batching.
#[async_trait]
pub trait MetricSink: Send + Sync {
    async fn push(&self, line: Bytes) -> Result<()>;
}

/// Pushes each line as its own authenticated HTTP POST.
pub struct HttpSink {
    client: reqwest::Client,
    url: String,
    authorization: String,
}

impl HttpSink {
    pub fn new(cfg: &MetricsSection) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(cfg.request_timeout())
            .user_agent(concat!("pizzametrics/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PizzaMetricsError::Config(format!("http client build failed: {e}")))?;

        Ok(Self {
            client,
            url: cfg.url.clone(),
            authorization: cfg.bearer(),
        })
    }
}

#[async_trait]
impl MetricSink for HttpSink {
    async fn push(&self, line: Bytes) -> Result<()> {
        let resp = self
            .client
            .post(&self.url)
            .header(AUTHORIZATION, &self.authorization)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(line)
            .send()
            .await
            .map_err(|e| PizzaMetricsError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PizzaMetricsError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}
