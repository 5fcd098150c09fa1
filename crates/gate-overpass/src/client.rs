//! Overpass API HTTP client with mirror failover and bounded retry.

use gate_core::models::{BoundingBox, Candidate};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Mirror endpoints queried in order within each attempt round.
pub const DEFAULT_ENDPOINTS: [&str; 2] = [
    "https://overpass-api.de/api/interpreter",
    "https://z.overpass-api.de/api/interpreter",
];

/// Attempt rounds before giving up.
const MAX_ATTEMPTS: u32 = 3;
/// Per-call timeout, also advertised to Overpass in the query header.
const QUERY_TIMEOUT_SECS: u64 = 60;
/// Fixed pause between exhausted attempt rounds. Deliberately flat, not
/// exponential, keeping total worst-case latency bounded and predictable.
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// The only failure the fetch surfaces. Individual endpoint failures are
/// recovered locally by failover and retry; callers cannot act on the
/// distinction between a timeout, a 5xx and a malformed body, so it is
/// logged here and erased.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("spatial query service unavailable: all endpoints exhausted")]
    Unavailable,
}

/// Per-endpoint failure causes, logged but never surfaced individually.
#[derive(Debug, Error)]
enum EndpointError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("malformed response body: {0}")]
    Malformed(reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: f64,
    lon: f64,
}

/// HTTP client for the Overpass spatial query mirrors.
///
/// Holds no per-request state; a single instance can serve concurrent
/// fetches.
pub struct OverpassClient {
    client: Client,
    endpoints: Vec<String>,
    attempts: u32,
    retry_delay: Duration,
}

impl Default for OverpassClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OverpassClient {
    /// Create a client over the default public mirrors.
    pub fn new() -> Self {
        Self::with_endpoints(DEFAULT_ENDPOINTS.iter().map(|s| s.to_string()).collect())
    }

    /// Create a client over a custom ordered endpoint list.
    pub fn with_endpoints(endpoints: Vec<String>) -> Self {
        Self {
            client: build_http_client(Duration::from_secs(QUERY_TIMEOUT_SECS)),
            endpoints,
            attempts: MAX_ATTEMPTS,
            retry_delay: RETRY_DELAY,
        }
    }

    /// Override the per-call timeout (default 60 s).
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.client = build_http_client(timeout);
    }

    /// Override the pause between exhausted attempt rounds (default 2 s).
    pub fn set_retry_delay(&mut self, delay: Duration) {
        self.retry_delay = delay;
    }

    /// Fetch all level-crossing candidates inside the bounding box.
    ///
    /// Tries each endpoint in order within each attempt round, sleeping the
    /// retry delay between rounds. An explicitly empty `elements` array is a
    /// valid "no crossings in this region" result and is returned without
    /// further retries.
    pub async fn fetch_candidates(
        &self,
        bbox: &BoundingBox,
    ) -> Result<Vec<Candidate>, FetchError> {
        let query = bbox_query(bbox);
        for attempt in 1..=self.attempts {
            for endpoint in &self.endpoints {
                match self.query_endpoint(endpoint, &query).await {
                    Ok(candidates) => {
                        tracing::debug!(
                            endpoint = %endpoint,
                            count = candidates.len(),
                            "overpass query succeeded"
                        );
                        return Ok(candidates);
                    }
                    Err(err) => {
                        tracing::warn!(
                            attempt,
                            endpoint = %endpoint,
                            error = %err,
                            "overpass endpoint failed"
                        );
                    }
                }
            }
            if attempt < self.attempts {
                tokio::time::sleep(self.retry_delay).await;
            }
        }
        Err(FetchError::Unavailable)
    }

    async fn query_endpoint(
        &self,
        endpoint: &str,
        query: &str,
    ) -> Result<Vec<Candidate>, EndpointError> {
        let response = self
            .client
            .get(endpoint)
            .query(&[("data", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EndpointError::Status(response.status()));
        }

        let payload = response
            .json::<OverpassResponse>()
            .await
            .map_err(EndpointError::Malformed)?;

        Ok(payload
            .elements
            .into_iter()
            .map(|element| Candidate::new(element.lat, element.lon))
            .collect())
    }
}

fn build_http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client")
}

/// Overpass QL for all level-crossing nodes inside a bounding box.
fn bbox_query(bbox: &BoundingBox) -> String {
    format!(
        "[out:json][timeout:{}];node[\"railway\"=\"level_crossing\"]({},{},{},{});out body;",
        QUERY_TIMEOUT_SECS, bbox.min_lat, bbox.min_lon, bbox.max_lat, bbox.max_lon
    )
}
