//! Greedy proximity clustering of crossing candidates into gates.

use crate::models::{Candidate, Gate};
use crate::spatial::haversine_distance_km;

/// Maximum distance (km) from a cluster's seed point for another candidate
/// to be absorbed into that cluster.
pub const DEFAULT_CLUSTER_THRESHOLD_KM: f64 = 0.05;

/// Group candidates into gates with a greedy single pass.
///
/// Each unvisited point seeds a new cluster and absorbs every later
/// unvisited point within `threshold_km` of the *seed*. Absorption is not
/// transitive: a point near an absorbed member but beyond the threshold
/// from the seed starts its own cluster. Cluster centers are arithmetic
/// means of member coordinates; gate numbers and names are assigned after
/// all clusters are formed, in seed order.
///
/// Every input point lands in exactly one gate, so the node counts of the
/// returned gates always sum to the input length. Output is fully
/// determined by input order and threshold. O(n²) in candidate count,
/// which stays small after upstream thinning.
pub fn cluster(points: &[Candidate], threshold_km: f64) -> Vec<Gate> {
    let mut used = vec![false; points.len()];
    let mut clusters: Vec<(f64, f64, usize)> = Vec::new();

    for i in 0..points.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        let seed = points[i];
        let mut lat_sum = seed.latitude;
        let mut lon_sum = seed.longitude;
        let mut count = 1usize;

        for j in (i + 1)..points.len() {
            if used[j] {
                continue;
            }
            let dist = haversine_distance_km(
                seed.latitude,
                seed.longitude,
                points[j].latitude,
                points[j].longitude,
            );
            if dist < threshold_km {
                used[j] = true;
                lat_sum += points[j].latitude;
                lon_sum += points[j].longitude;
                count += 1;
            }
        }

        clusters.push((lat_sum / count as f64, lon_sum / count as f64, count));
    }

    clusters
        .into_iter()
        .enumerate()
        .map(|(index, (latitude, longitude, node_count))| {
            let gate_number = (index + 1) as u32;
            Gate {
                latitude,
                longitude,
                gate_number,
                name: format!("Gate {}", gate_number),
                node_count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeoPoint;

    #[test]
    fn nearby_pair_merges_and_distant_point_stands_alone() {
        // 0.0003 deg longitude at the equator is ~33m, inside the 50m threshold.
        let candidates = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.0003),
            GeoPoint::new(10.0, 10.0),
        ];
        let gates = cluster(&candidates, DEFAULT_CLUSTER_THRESHOLD_KM);

        assert_eq!(gates.len(), 2);
        assert_eq!(gates[0].node_count, 2);
        assert!((gates[0].latitude - 0.0).abs() < 1e-9);
        assert!((gates[0].longitude - 0.00015).abs() < 1e-9);
        assert_eq!(gates[1].node_count, 1);
        assert_eq!(gates[1].latitude, 10.0);
        assert_eq!(gates[1].longitude, 10.0);
    }

    #[test]
    fn every_candidate_lands_in_exactly_one_gate() {
        // Mix of tight pairs, a chain and isolated points.
        let candidates = vec![
            GeoPoint::new(9.0, 76.0),
            GeoPoint::new(9.0001, 76.0),
            GeoPoint::new(9.5, 76.2),
            GeoPoint::new(9.0002, 76.0),
            GeoPoint::new(9.5003, 76.2),
            GeoPoint::new(10.0, 77.0),
            GeoPoint::new(9.00005, 76.00005),
        ];
        let gates = cluster(&candidates, DEFAULT_CLUSTER_THRESHOLD_KM);
        let total: usize = gates.iter().map(|g| g.node_count).sum();
        assert_eq!(total, candidates.len());
        assert!(gates.iter().all(|g| g.node_count >= 1));
    }

    #[test]
    fn absorption_is_relative_to_the_seed_not_members() {
        // Points 40m apart in a line: p1 joins p0's cluster, but p2 is ~80m
        // from the seed so it starts its own gate even though it is within
        // 50m of p1.
        let step = 0.00036; // ~40m of latitude
        let chain = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(step, 0.0),
            GeoPoint::new(2.0 * step, 0.0),
        ];
        let gates = cluster(&chain, DEFAULT_CLUSTER_THRESHOLD_KM);
        assert_eq!(gates.len(), 2);
        assert_eq!(gates[0].node_count, 2);
        assert_eq!(gates[1].node_count, 1);
    }

    #[test]
    fn numbering_is_sequential_in_seed_order() {
        let candidates = vec![
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(2.0, 2.0),
            GeoPoint::new(3.0, 3.0),
        ];
        let gates = cluster(&candidates, DEFAULT_CLUSTER_THRESHOLD_KM);
        let numbers: Vec<u32> = gates.iter().map(|g| g.gate_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        let names: Vec<&str> = gates.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Gate 1", "Gate 2", "Gate 3"]);
    }

    #[test]
    fn clustering_is_deterministic() {
        let candidates = vec![
            GeoPoint::new(9.0, 76.0),
            GeoPoint::new(9.0001, 76.0),
            GeoPoint::new(9.5, 76.2),
            GeoPoint::new(10.0, 77.0),
        ];
        let first = cluster(&candidates, DEFAULT_CLUSTER_THRESHOLD_KM);
        let second = cluster(&candidates, DEFAULT_CLUSTER_THRESHOLD_KM);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_yields_no_gates() {
        assert!(cluster(&[], DEFAULT_CLUSTER_THRESHOLD_KM).is_empty());
    }
}
