//! Overpass-backed gate discovery.
//!
//! Fetches raw level-crossing candidates for a route's bounding box from
//! mirrored Overpass endpoints, with failover and bounded retry, and runs
//! the `gate-core` clustering pipeline over the result.

pub mod client;
pub mod finder;
pub mod report;

pub use client::{FetchError, OverpassClient, DEFAULT_ENDPOINTS};
pub use finder::{GateFinder, GateQueryError};
pub use report::{GateReport, ReportClient, TrackedGate};
