//! Core data models for the gate detection pipeline.

use serde::{Deserialize, Serialize};

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Whether the coordinate lies inside the valid lat/lon ranges.
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A raw level-crossing point as reported by the spatial query service.
/// Candidates carry no identity beyond their position.
pub type Candidate = GeoPoint;

/// Degrees of padding applied to each side of a route's bounding box so that
/// crossings just off the route's extremities are still captured.
pub const BBOX_PADDING_DEG: f64 = 0.01;

/// Axis-aligned lat/lon rectangle used to scope spatial queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Compute the padded bounding box around a set of points.
    /// Returns `None` for an empty slice.
    pub fn around(points: &[GeoPoint]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = Self {
            min_lat: first.latitude,
            max_lat: first.latitude,
            min_lon: first.longitude,
            max_lon: first.longitude,
        };
        for point in &points[1..] {
            bbox.min_lat = bbox.min_lat.min(point.latitude);
            bbox.max_lat = bbox.max_lat.max(point.latitude);
            bbox.min_lon = bbox.min_lon.min(point.longitude);
            bbox.max_lon = bbox.max_lon.max(point.longitude);
        }
        bbox.min_lat -= BBOX_PADDING_DEG;
        bbox.max_lat += BBOX_PADDING_DEG;
        bbox.min_lon -= BBOX_PADDING_DEG;
        bbox.max_lon += BBOX_PADDING_DEG;
        Some(bbox)
    }
}

/// A clustered group of one or more raw crossing candidates, presented to the
/// user as a single point of interest.
///
/// `gate_number` is 1-based and sequential in cluster-discovery order; it is
/// positional, not derived from any external ID, and is never reused or
/// reordered once assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gate {
    pub latitude: f64,
    pub longitude: f64,
    pub gate_number: u32,
    pub name: String,
    /// Number of raw candidates absorbed into this cluster (>= 1).
    pub node_count: usize,
}
