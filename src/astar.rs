// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::{BinaryHeap, HashMap};

use crate::geo::earth_distance;
use crate::{GeoCoord, GeoIndex, PlanError, StreetSegment};

#[derive(Debug, Clone)]
struct QueueItem {
    at: GeoCoord,
    cost: f64,
    score: f64,
    seq: u64,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.seq == other.seq
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: We revert the order of comparison,
        // as lower scores are considered better ("higher"),
        // and Rust's BinaryHeap is a max-heap.
        // Score ties go to the earlier insertion, keeping results
        // reproducible for identical inputs.
        other
            .score
            .partial_cmp(&self.score)
            .unwrap()
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

fn reconstruct_path(
    came_from: &HashMap<GeoCoord, StreetSegment>,
    start: &GeoCoord,
    end: &GeoCoord,
) -> Vec<StreetSegment> {
    let mut path = Vec::new();
    let mut current = end;

    while current != start {
        match came_from.get(current) {
            Some(segment) => {
                path.push(segment.clone());
                current = &segment.start;
            }
            None => break,
        }
    }

    path.reverse();
    path
}

/// Uses the [A* algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
/// to find the shortest sequence of segments between two coordinates in the
/// provided index, together with its total length in miles.
///
/// The heuristic is the crow-flies [earth_distance] to `end`, which never
/// overestimates road distance. A coordinate may be reached by multiple
/// partial paths; only the cheapest arrival is kept, and superseded frontier
/// entries are skipped at pop time instead of being removed eagerly.
///
/// Fails with [PlanError::InvalidCoordinate] when either endpoint has no
/// outgoing segments in the index, and with [PlanError::NoRoute] once the
/// frontier empties without reaching `end`. `start == end` yields an empty
/// path of length zero.
pub fn find_route(
    index: &GeoIndex,
    start: &GeoCoord,
    end: &GeoCoord,
) -> Result<(Vec<StreetSegment>, f64), PlanError> {
    index
        .segments_from(start)
        .ok_or_else(|| PlanError::InvalidCoordinate(start.clone()))?;
    index
        .segments_from(end)
        .ok_or_else(|| PlanError::InvalidCoordinate(end.clone()))?;

    if start == end {
        return Ok((Vec::new(), 0.0));
    }

    let mut queue: BinaryHeap<QueueItem> = BinaryHeap::default();
    let mut came_from: HashMap<GeoCoord, StreetSegment> = HashMap::default();
    let mut known_costs: HashMap<GeoCoord, f64> = HashMap::default();
    let mut seq: u64 = 0;

    queue.push(QueueItem {
        at: start.clone(),
        cost: 0.0,
        score: earth_distance(start, end),
        seq,
    });
    known_costs.insert(start.clone(), 0.0);

    while let Some(item) = queue.pop() {
        if item.at == *end {
            return Ok((reconstruct_path(&came_from, start, end), item.cost));
        }

        // Contrary to the wikipedia definition, we might keep multiple items in the queue for the same coordinate.
        if item.cost > known_costs.get(&item.at).copied().unwrap_or(f64::INFINITY) {
            continue;
        }

        for segment in index.segments_from(&item.at).unwrap_or_default() {
            // Check if this is the cheapest way to the segment's end
            let neighbor_cost = item.cost + earth_distance(&segment.start, &segment.end);
            if neighbor_cost
                >= known_costs
                    .get(&segment.end)
                    .copied()
                    .unwrap_or(f64::INFINITY)
            {
                continue;
            }

            came_from.insert(segment.end.clone(), segment.clone());
            known_costs.insert(segment.end.clone(), neighbor_cost);
            seq += 1;
            queue.push(QueueItem {
                at: segment.end.clone(),
                cost: neighbor_cost,
                score: neighbor_cost + earth_distance(&segment.end, end),
                seq,
            });
        }
    }

    Err(PlanError::NoRoute {
        from: start.clone(),
        to: end.clone(),
    })
}
