//! Reporting client for the railway backend.
//!
//! Once a user picks a gate, the full gate and route data is submitted so
//! the backend can attach live train information. The exchange has no
//! bearing on the clustering pipeline; the echoed records are only used for
//! navigation by the caller.

use anyhow::{Context, Result};
use gate_core::models::{Gate, GeoPoint};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

/// Payload submitted to the backend's `/railway_data` endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateReport<'a> {
    pub gates: &'a [Gate],
    pub route_coordinates: &'a [GeoPoint],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_gate_id: Option<u32>,
}

/// A gate record echoed back by the backend, keyed by its server-assigned
/// `gate_id`. The remaining fields (live train data etc.) are passed
/// through untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackedGate {
    pub gate_id: u32,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct ReportResponse {
    gates: Vec<TrackedGate>,
}

/// HTTP client for the railway reporting backend.
pub struct ReportClient {
    client: Client,
    base_url: String,
}

impl ReportClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.into(),
        }
    }

    /// Submit gates and route; returns the backend's gate records.
    pub async fn submit(&self, report: &GateReport<'_>) -> Result<Vec<TrackedGate>> {
        let url = format!("{}/railway_data", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(report)
            .send()
            .await
            .context("Failed to send gate report")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Gate report failed: {} {}", status, body));
        }

        let payload: ReportResponse = response
            .json()
            .await
            .context("Failed to parse gate report response")?;

        Ok(payload.gates)
    }
}
