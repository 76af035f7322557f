// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::hashmap::ChainedHashMap;
use crate::{GeoCoord, StreetSegment};

/// Maps every coordinate of the street network to the [StreetSegments](StreetSegment)
/// that start there.
///
/// Built once by the map loader and read-only afterwards: [PathFinder](crate::find_route)
/// calls only borrow into it. A coordinate that was never inserted is not part
/// of the map, which [segments_from](GeoIndex::segments_from) signals with None.
#[derive(Debug, Default, Clone)]
pub struct GeoIndex(ChainedHashMap<GeoCoord, Vec<StreetSegment>>);

impl GeoIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of indexed coordinates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Records a segment as outgoing from the given coordinate.
    ///
    /// Inserting a segment that is already present at that coordinate
    /// (same start, end and street name) is silently ignored.
    pub fn put(&mut self, coord: GeoCoord, segment: StreetSegment) {
        match self.0.get_mut(&coord) {
            Some(segments) => {
                if !segments.contains(&segment) {
                    segments.push(segment);
                }
            }
            None => self.0.insert(coord, vec![segment]),
        }
    }

    /// All segments starting at the given coordinate, or None if the
    /// coordinate is not covered by the map data. A returned slice is
    /// never empty.
    pub fn segments_from(&self, coord: &GeoCoord) -> Option<&[StreetSegment]> {
        self.0.get(coord).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: &str, lon: &str) -> GeoCoord {
        GeoCoord::new(lat, lon).unwrap()
    }

    fn segment(start: &GeoCoord, end: &GeoCoord, name: &str) -> StreetSegment {
        StreetSegment {
            start: start.clone(),
            end: end.clone(),
            name: name.to_string(),
        }
    }

    #[test]
    fn duplicate_segments_are_ignored() {
        let a = coord("34.0", "-118.0");
        let b = coord("34.1", "-118.0");
        let mut index = GeoIndex::new();
        index.put(a.clone(), segment(&a, &b, "Main St"));
        index.put(a.clone(), segment(&a, &b, "Main St"));
        assert_eq!(index.segments_from(&a).unwrap().len(), 1);
    }

    #[test]
    fn directions_are_distinct_segments() {
        let a = coord("34.0", "-118.0");
        let b = coord("34.1", "-118.0");
        let forward = segment(&a, &b, "Main St");
        let mut index = GeoIndex::new();
        index.put(a.clone(), forward.clone());
        index.put(b.clone(), forward.reversed());

        assert_eq!(index.segments_from(&a), Some(&[forward.clone()][..]));
        assert_eq!(index.segments_from(&b), Some(&[forward.reversed()][..]));
    }

    #[test]
    fn unknown_coordinate_is_none() {
        let index = GeoIndex::new();
        assert_eq!(index.segments_from(&coord("0.0", "0.0")), None);
    }

    #[test]
    fn same_endpoints_different_street_both_kept() {
        let a = coord("34.0", "-118.0");
        let b = coord("34.1", "-118.0");
        let mut index = GeoIndex::new();
        index.put(a.clone(), segment(&a, &b, "Main St"));
        index.put(a.clone(), segment(&a, &b, "Broadway"));
        assert_eq!(index.segments_from(&a).unwrap().len(), 2);
    }
}
