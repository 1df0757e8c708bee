//! HTTP upstream adapter.
//!
//! Implements [`UpstreamPort`] against the stock-data backend's `/api/tv/*`
//! routes with a shared reqwest client. Exactly one GET per `fetch`; the
//! caller decides what a given status or body means.

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

use crate::domain::error::{UpstreamError, VnfeedError};
use crate::domain::udf::UdfOperation;
use crate::domain::upstream::UpstreamResponse;
use crate::ports::config_port::ConfigPort;
use crate::ports::upstream_port::UpstreamPort;

pub const DEFAULT_TIMEOUT_SECONDS: i64 = 10;

#[derive(Debug)]
pub struct HttpUpstream {
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl HttpUpstream {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, VnfeedError> {
        let base_url = base_url.trim_end_matches('/').to_string();

        let parsed =
            reqwest::Url::parse(&base_url).map_err(|e| VnfeedError::ConfigInvalid {
                section: "upstream".into(),
                key: "base_url".into(),
                reason: e.to_string(),
            })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(VnfeedError::ConfigInvalid {
                section: "upstream".into(),
                key: "base_url".into(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("vnfeed/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        Ok(Self {
            base_url,
            timeout,
            client,
        })
    }

    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, VnfeedError> {
        let base_url = config.get_string("upstream", "base_url").ok_or_else(|| {
            VnfeedError::ConfigMissing {
                section: "upstream".into(),
                key: "base_url".into(),
            }
        })?;

        let timeout_seconds =
            config.get_int("upstream", "timeout_seconds", DEFAULT_TIMEOUT_SECONDS);
        if timeout_seconds <= 0 {
            return Err(VnfeedError::ConfigInvalid {
                section: "upstream".into(),
                key: "timeout_seconds".into(),
                reason: format!("must be positive, got {timeout_seconds}"),
            });
        }

        Self::new(&base_url, Duration::from_secs(timeout_seconds as u64))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn map_error(&self, err: reqwest::Error) -> UpstreamError {
        if err.is_timeout() {
            UpstreamError::Timeout { after: self.timeout }
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl UpstreamPort for HttpUpstream {
    async fn fetch(
        &self,
        op: UdfOperation,
        params: &[(String, String)],
    ) -> Result<UpstreamResponse, UpstreamError> {
        let url = format!("{}/api/tv/{}", self.base_url, op.wire_name());
        debug!(op = %op, url = %url, "forwarding feed request");

        let response = self
            .client
            .get(&url)
            // Polling charts must never be answered from a stale cache.
            .header(CACHE_CONTROL, "no-store")
            .query(params)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_error(e))?
            .to_vec();

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }
}
