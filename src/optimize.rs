// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use rand::Rng;

use crate::geo::earth_distance;
use crate::{DeliveryRequest, GeoCoord};

const INITIAL_TEMPERATURE: f64 = 0.9;
const TEMPERATURE_DECAY: f64 = 0.999;

/// Stop after this many consecutive non-improving iterations.
const STAGNATION_LIMIT: u32 = 250;

/// Hard cap on iterations, in case the stagnation budget keeps resetting.
const ITERATION_LIMIT: u32 = 20_000;

/// Result of [optimize_delivery_order]: the reordered deliveries plus the
/// crow-flies tour lengths before and after optimization, in miles.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizedOrder {
    pub deliveries: Vec<DeliveryRequest>,
    pub old_crow_distance: f64,
    pub new_crow_distance: f64,
}

/// Crow-flies length of the tour depot → deliveries[0] → … → deliveries[n-1],
/// in miles. No return leg.
pub fn crow_distance(depot: &GeoCoord, deliveries: &[DeliveryRequest]) -> f64 {
    let mut total = 0.0;
    let mut current = depot;
    for delivery in deliveries {
        total += earth_distance(current, &delivery.location);
        current = &delivery.location;
    }
    total
}

/// Reorders deliveries to shorten the crow-flies tour from the depot, using
/// [simulated annealing](https://en.wikipedia.org/wiki/Simulated_annealing)
/// over permutations.
///
/// Neighbors are single transpositions of the current order. Strictly
/// shorter tours are always accepted (and reset the stagnation counter);
/// worse ones are accepted with a probability that decays geometrically
/// with every iteration. The best permutation seen at any point is returned,
/// so the result is never longer than the input order.
///
/// This is a cheap pre-pass before road search: only crow-flies distances
/// are considered, and exactness is not guaranteed. With fewer than two
/// deliveries there is nothing to reorder and both reported distances
/// are zero.
///
/// The generator is injected so that results are reproducible with a
/// seeded [rand::rngs::StdRng].
pub fn optimize_delivery_order<R: Rng>(
    depot: &GeoCoord,
    deliveries: &[DeliveryRequest],
    rng: &mut R,
) -> OptimizedOrder {
    if deliveries.len() < 2 {
        return OptimizedOrder {
            deliveries: deliveries.to_vec(),
            old_crow_distance: 0.0,
            new_crow_distance: 0.0,
        };
    }

    let old_crow_distance = crow_distance(depot, deliveries);

    let mut current = deliveries.to_vec();
    let mut current_distance = old_crow_distance;
    let mut best = current.clone();
    let mut best_distance = current_distance;

    let mut temperature = INITIAL_TEMPERATURE;
    let mut stagnant: u32 = 0;
    let mut iterations: u32 = 0;

    while stagnant < STAGNATION_LIMIT && iterations < ITERATION_LIMIT {
        let mut candidate = current.clone();
        let i = rng.random_range(0..candidate.len());
        let j = rng.random_range(0..candidate.len());
        candidate.swap(i, j);
        let candidate_distance = crow_distance(depot, &candidate);

        if candidate_distance < current_distance {
            current = candidate;
            current_distance = candidate_distance;
            stagnant = 0;

            if current_distance < best_distance {
                best = current.clone();
                best_distance = current_distance;
            }
        } else {
            if rng.random::<f64>() < temperature {
                current = candidate;
                current_distance = candidate_distance;
            }
            stagnant += 1;
        }

        temperature *= TEMPERATURE_DECAY;
        iterations += 1;
    }

    log::debug!(
        "delivery order: crow distance {:.4} -> {:.4} mi after {} iterations",
        old_crow_distance,
        best_distance,
        iterations
    );

    OptimizedOrder {
        deliveries: best,
        old_crow_distance,
        new_crow_distance: best_distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-9),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    fn coord(lat: &str, lon: &str) -> GeoCoord {
        GeoCoord::new(lat, lon).unwrap()
    }

    fn delivery(lat: &str, lon: &str, item: &str) -> DeliveryRequest {
        DeliveryRequest {
            location: coord(lat, lon),
            item: item.to_string(),
        }
    }

    fn scattered_deliveries() -> Vec<DeliveryRequest> {
        vec![
            delivery("0.05", "0.00", "alpha"),
            delivery("0.00", "0.01", "bravo"),
            delivery("0.04", "0.02", "charlie"),
            delivery("0.01", "0.05", "delta"),
            delivery("0.03", "0.03", "echo"),
            delivery("0.02", "0.04", "foxtrot"),
        ]
    }

    #[test]
    fn crow_distance_matches_direct_recomputation() {
        let depot = coord("0.0", "0.0");
        let deliveries = scattered_deliveries();

        let mut expected = earth_distance(&depot, &deliveries[0].location);
        for pair in deliveries.windows(2) {
            expected += earth_distance(&pair[0].location, &pair[1].location);
        }
        assert_almost_eq!(crow_distance(&depot, &deliveries), expected);
    }

    #[test]
    fn never_returns_a_longer_tour() {
        let depot = coord("0.0", "0.0");
        let deliveries = scattered_deliveries();
        let before = crow_distance(&depot, &deliveries);

        let mut rng = StdRng::seed_from_u64(42);
        let result = optimize_delivery_order(&depot, &deliveries, &mut rng);

        assert!(result.new_crow_distance <= result.old_crow_distance);
        assert_almost_eq!(result.old_crow_distance, before);
        assert_almost_eq!(
            result.new_crow_distance,
            crow_distance(&depot, &result.deliveries)
        );
    }

    #[test]
    fn same_seed_same_order() {
        let depot = coord("0.0", "0.0");
        let deliveries = scattered_deliveries();

        let a = optimize_delivery_order(&depot, &deliveries, &mut StdRng::seed_from_u64(7));
        let b = optimize_delivery_order(&depot, &deliveries, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn keeps_every_delivery() {
        let depot = coord("0.0", "0.0");
        let deliveries = scattered_deliveries();

        let mut rng = StdRng::seed_from_u64(1);
        let mut result = optimize_delivery_order(&depot, &deliveries, &mut rng);

        assert_eq!(result.deliveries.len(), deliveries.len());
        for delivery in &deliveries {
            assert!(result.deliveries.contains(delivery));
        }
        result.deliveries.dedup();
        assert_eq!(result.deliveries.len(), deliveries.len());
    }

    #[test]
    fn zero_or_one_deliveries_short_circuit() {
        let depot = coord("0.0", "0.0");
        let mut rng = StdRng::seed_from_u64(0);

        let empty = optimize_delivery_order(&depot, &[], &mut rng);
        assert!(empty.deliveries.is_empty());
        assert_eq!(empty.old_crow_distance, 0.0);
        assert_eq!(empty.new_crow_distance, 0.0);

        let single = vec![delivery("0.01", "0.01", "solo")];
        let result = optimize_delivery_order(&depot, &single, &mut rng);
        assert_eq!(result.deliveries, single);
        assert_eq!(result.old_crow_distance, 0.0);
        assert_eq!(result.new_crow_distance, 0.0);
    }
}
