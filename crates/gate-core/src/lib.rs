//! Pure geospatial logic for turning a driving route and raw railway
//! level-crossing candidates into a stable, presentable set of gates.
//!
//! No I/O lives here; fetching candidates from the spatial query service is
//! the `gate-overpass` crate's job.

pub mod cluster;
pub mod models;
pub mod simplify;
pub mod spatial;

pub use cluster::{cluster, DEFAULT_CLUSTER_THRESHOLD_KM};
pub use models::{BoundingBox, Candidate, Gate, GeoPoint, BBOX_PADDING_DEG};
pub use simplify::simplify;
pub use spatial::{haversine_distance_km, path_length_km};
