//! Overpass API client wrapper.

use tracing::{debug, instrument, warn};

use crate::config::Config;
use crate::error::UpstreamError;
use crate::metrics::{self, LatencyTimer, METRIC_UPSTREAM_LATENCY};

use super::query::FacilityQuery;
use super::types::{Element, OverpassResponse};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Overpass interpreter client.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Interpreter endpoint.
    url: String,
    /// Surface non-2xx statuses instead of returning no elements.
    strict: bool,
}

impl OverpassClient {
    /// Create a new client with bounded timeouts from config.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.overpass_timeout())
            .connect_timeout(config.overpass_connect_timeout())
            .build()?;

        Ok(Self {
            http,
            url: config.overpass_url.clone(),
            strict: config.strict_upstream,
        })
    }

    /// Get the interpreter endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether non-2xx statuses are reported as errors.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Run a facility search and return the raw elements in upstream order.
    ///
    /// A non-2xx status yields an empty list unless the client is strict.
    /// Timeouts, transport failures and undecodable bodies are always errors.
    #[instrument(
        skip(self, query),
        fields(latitude = query.latitude, longitude = query.longitude, radius = query.radius)
    )]
    pub async fn fetch_elements(&self, query: &FacilityQuery) -> Result<Vec<Element>, UpstreamError> {
        let ql = query.to_overpass_ql();
        debug!(query = %ql, "Sending Overpass query");

        let timer = LatencyTimer::new(METRIC_UPSTREAM_LATENCY);
        let result = self.send(&ql).await;
        debug!(elapsed_ms = timer.elapsed_ms(), "Overpass call finished");
        drop(timer);

        if let Err(e) = &result {
            metrics::inc_upstream_failures(e.code());
        }
        result
    }

    async fn send(&self, ql: &str) -> Result<Vec<Element>, UpstreamError> {
        let response = self
            .http
            .get(&self.url)
            .query(&[("data", ql)])
            .send()
            .await
            .map_err(UpstreamError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Overpass returned non-success status");
            if self.strict {
                return Err(UpstreamError::Status {
                    status: status.as_u16(),
                });
            }
            metrics::inc_upstream_failures("upstream_status_ignored");
            return Ok(Vec::new());
        }

        let body = response
            .bytes()
            .await
            .map_err(UpstreamError::from_transport)?;

        let parsed: OverpassResponse = serde_json::from_slice(&body)
            .map_err(|e| UpstreamError::InvalidResponse(e.to_string()))?;

        debug!(count = parsed.elements.len(), "Received Overpass elements");
        Ok(parsed.elements)
    }
}
