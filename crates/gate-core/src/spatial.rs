//! Spatial math for distance and path-length calculations.

use crate::models::GeoPoint;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate great-circle distance between two points in kilometers using
/// the Haversine formula.
///
/// Symmetric in its arguments and zero for identical points. Any finite
/// lat/lon pair is valid input; range checking is the caller's concern.
pub fn haversine_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Total length of a path in kilometers, summed over consecutive pairs.
/// Zero for empty or single-point paths.
pub fn path_length_km(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| {
            haversine_distance_km(
                pair[0].latitude,
                pair[0].longitude,
                pair[1].latitude,
                pair[1].longitude,
            )
        })
        .sum()
}
