//! Length-tiered polyline thinning.
//!
//! Bounds the size of downstream clustering input on long routes by keeping
//! every Nth point once the total path length crosses a tier boundary. This
//! is an O(n) amplitude-reduction heuristic, not a shape-preserving
//! simplification: the final point is not guaranteed to survive.

use crate::models::GeoPoint;
use crate::spatial::path_length_km;

/// Below this total length (km) the input is returned unchanged.
pub const SHORT_ROUTE_KM: f64 = 50.0;
/// Between the tiers every 5th point is kept; at or above this every 10th.
pub const LONG_ROUTE_KM: f64 = 150.0;

/// Thin a path according to its total length: unchanged below 50 km, every
/// 5th point (by original index) from 50 km, every 10th from 150 km.
pub fn simplify(points: &[GeoPoint]) -> Vec<GeoPoint> {
    let stride = stride_for_length(path_length_km(points));
    thin(points, stride)
}

fn stride_for_length(length_km: f64) -> usize {
    if length_km < SHORT_ROUTE_KM {
        1
    } else if length_km < LONG_ROUTE_KM {
        5
    } else {
        10
    }
}

fn thin(points: &[GeoPoint], stride: usize) -> Vec<GeoPoint> {
    if stride <= 1 {
        return points.to_vec();
    }
    points
        .iter()
        .step_by(stride)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    // Kilometers per degree of latitude on the haversine sphere.
    const KM_PER_DEG_LAT: f64 = crate::spatial::EARTH_RADIUS_KM * PI / 180.0;

    /// Build a meridian route of `count` points totalling `total_km`.
    fn route_of_length(total_km: f64, count: usize) -> Vec<GeoPoint> {
        assert!(count >= 2);
        let step_deg = total_km / KM_PER_DEG_LAT / (count - 1) as f64;
        (0..count)
            .map(|i| GeoPoint::new(i as f64 * step_deg, 76.5))
            .collect()
    }

    #[test]
    fn short_route_is_unchanged() {
        let route = route_of_length(40.0, 30);
        assert_eq!(simplify(&route), route);
    }

    #[test]
    fn tier_boundary_rounds_consistently() {
        let just_under = route_of_length(49.99, 30);
        assert_eq!(simplify(&just_under).len(), 30);

        let just_over = route_of_length(50.01, 30);
        assert_eq!(simplify(&just_over).len(), 6);
    }

    #[test]
    fn medium_route_keeps_every_fifth_index() {
        let route = route_of_length(120.0, 23);
        let simplified = simplify(&route);
        let expected: Vec<GeoPoint> = route.iter().step_by(5).copied().collect();
        assert_eq!(simplified, expected);
        assert_eq!(simplified.len(), 5); // indices 0, 5, 10, 15, 20
    }

    #[test]
    fn long_route_keeps_every_tenth_index() {
        let route = route_of_length(200.0, 41);
        let simplified = simplify(&route);
        let expected: Vec<GeoPoint> = route.iter().step_by(10).copied().collect();
        assert_eq!(simplified, expected);
    }

    #[test]
    fn endpoint_is_not_guaranteed_to_survive() {
        // 22 points: kept indices are 0,5,10,15,20 so index 21 is dropped.
        let route = route_of_length(120.0, 22);
        let simplified = simplify(&route);
        assert_ne!(simplified.last(), route.last());
    }

    #[test]
    fn degenerate_inputs() {
        assert!(simplify(&[]).is_empty());
        let single = vec![GeoPoint::new(9.0, 76.5)];
        assert_eq!(simplify(&single), single);
    }
}
