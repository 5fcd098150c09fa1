//! Gate query orchestration: route in, clustered gates out.

use gate_core::models::{BoundingBox, Gate, GeoPoint};
use gate_core::{cluster, simplify, DEFAULT_CLUSTER_THRESHOLD_KM};
use thiserror::Error;

use crate::client::{FetchError, OverpassClient};

#[derive(Debug, Error)]
pub enum GateQueryError {
    /// The supplied route has no coordinates.
    #[error("route contains no coordinates")]
    EmptyRoute,
    /// A route coordinate falls outside the valid lat/lon ranges.
    #[error("coordinate out of range: ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
    /// Every spatial-query endpoint was exhausted without a usable response.
    #[error("spatial data source unavailable")]
    SourceUnavailable(#[from] FetchError),
}

/// Runs the full pipeline: bounding box, candidate fetch, optional
/// thinning, clustering. Stateless across calls; each `find_gates`
/// invocation owns its own intermediate data.
pub struct GateFinder {
    client: OverpassClient,
    cluster_threshold_km: f64,
    thin_candidates: bool,
}

impl GateFinder {
    pub fn new(client: OverpassClient) -> Self {
        Self {
            client,
            cluster_threshold_km: DEFAULT_CLUSTER_THRESHOLD_KM,
            thin_candidates: false,
        }
    }

    /// Override the clustering threshold (default 0.05 km).
    pub fn set_cluster_threshold(&mut self, threshold_km: f64) {
        self.cluster_threshold_km = threshold_km;
    }

    /// Apply the length-tiered thinning to the candidate list before
    /// clustering. Off by default: the tiers are keyed on path length,
    /// which candidate ordering does not represent.
    pub fn set_candidate_thinning(&mut self, enabled: bool) {
        self.thin_candidates = enabled;
    }

    /// Find the gates along a route.
    ///
    /// An empty candidate list is a success with zero gates, distinct from
    /// `SourceUnavailable`; callers are expected to render the two
    /// differently.
    pub async fn find_gates(&self, route: &[GeoPoint]) -> Result<Vec<Gate>, GateQueryError> {
        if let Some(bad) = route.iter().find(|point| !point.in_range()) {
            return Err(GateQueryError::InvalidCoordinate {
                latitude: bad.latitude,
                longitude: bad.longitude,
            });
        }
        let bbox = BoundingBox::around(route).ok_or(GateQueryError::EmptyRoute)?;

        let candidates = self.client.fetch_candidates(&bbox).await?;
        if candidates.is_empty() {
            tracing::info!("no crossings found in route bounding box");
            return Ok(Vec::new());
        }

        let candidates = if self.thin_candidates {
            simplify(&candidates)
        } else {
            candidates
        };

        let gates = cluster(&candidates, self.cluster_threshold_km);
        tracing::info!(gates = gates.len(), "gate query complete");
        Ok(gates)
    }
}
