// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::{GeoCoord, StreetSegment};

/// Mean radius of Earth, in kilometers.
/// Source: https://en.wikipedia.org/wiki/Earth_radius#Arithmetic_mean_radius
const EARTH_RADIUS: f64 = 6371.0088;

/// Mean diameter of Earth, in kilometers.
/// Source: https://en.wikipedia.org/wiki/Earth_radius#Arithmetic_mean_radius
const EARTH_DIAMETER: f64 = EARTH_RADIUS + EARTH_RADIUS;

const KM_PER_MILE: f64 = 1.609344;

/// Calculates the great-circle distance between two coordinates
/// on Earth using the `haversine formula <https://en.wikipedia.org/wiki/Haversine_formula>`_.
/// Returns the result in miles.
pub fn earth_distance(a: &GeoCoord, b: &GeoCoord) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lon1 = a.longitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let lon2 = b.longitude().to_radians();

    let sin_dlat_half = ((lat2 - lat1) * 0.5).sin();
    let sin_dlon_half = ((lon2 - lon1) * 0.5).sin();

    let h = sin_dlat_half * sin_dlat_half + lat1.cos() * lat2.cos() * sin_dlon_half * sin_dlon_half;

    EARTH_DIAMETER * h.sqrt().asin() / KM_PER_MILE
}

/// Compass direction of travel along a segment, in degrees in [0, 360).
///
/// 0° points east, 90° north, 180° west, 270° south (the planar angle of the
/// Δlatitude/Δlongitude vector). A zero-length segment has a bearing of 0°.
pub fn bearing(segment: &StreetSegment) -> f64 {
    let dlat = segment.end.latitude() - segment.start.latitude();
    let dlon = segment.end.longitude() - segment.start.longitude();

    if dlat == 0.0 && dlon == 0.0 {
        return 0.0;
    }

    let mut degrees = dlat.atan2(dlon).to_degrees();
    if degrees < 0.0 {
        degrees += 360.0;
    }
    // Rounding of a tiny negative angle can land exactly on 360.
    if degrees >= 360.0 {
        degrees = 0.0;
    }
    degrees
}

/// Signed angle from the incoming segment's bearing to the outgoing
/// segment's bearing, in degrees in [0, 360).
pub fn angle_between(incoming: &StreetSegment, outgoing: &StreetSegment) -> f64 {
    let mut degrees = bearing(outgoing) - bearing(incoming);
    if degrees < 0.0 {
        degrees += 360.0;
    }
    if degrees >= 360.0 {
        degrees = 0.0;
    }
    degrees
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! assert_almost_eq {
        ($a:expr, $b:expr) => {
            assert!(
                (($a - $b).abs() < 1e-3),
                "assertion failed: {} ≈ {}",
                $a,
                $b
            )
        };
    }

    fn coord(lat: &str, lon: &str) -> GeoCoord {
        GeoCoord::new(lat, lon).unwrap()
    }

    fn segment(start: &GeoCoord, end: &GeoCoord) -> StreetSegment {
        StreetSegment {
            start: start.clone(),
            end: end.clone(),
            name: "Test St".to_string(),
        }
    }

    #[test]
    fn one_degree_of_longitude_at_equator() {
        // 6371.0088 km * π/180 ≈ 111.195 km ≈ 69.093 mi
        let d = earth_distance(&coord("0.0", "0.0"), &coord("0.0", "1.0"));
        assert_almost_eq!(d, 69.0933);
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let a = coord("34.0547000", "-118.4794734");
        let b = coord("34.0544590", "-118.4801137");
        assert_almost_eq!(earth_distance(&a, &b), earth_distance(&b, &a));
        assert_eq!(earth_distance(&a, &a), 0.0);
    }

    #[test]
    fn bearing_octants() {
        let origin = coord("0.0", "0.0");
        assert_almost_eq!(bearing(&segment(&origin, &coord("0.0", "0.001"))), 0.0);
        assert_almost_eq!(bearing(&segment(&origin, &coord("0.001", "0.001"))), 45.0);
        assert_almost_eq!(bearing(&segment(&origin, &coord("0.001", "0.0"))), 90.0);
        assert_almost_eq!(bearing(&segment(&origin, &coord("0.0", "-0.001"))), 180.0);
        assert_almost_eq!(bearing(&segment(&origin, &coord("-0.001", "0.0"))), 270.0);
        assert_almost_eq!(bearing(&segment(&origin, &coord("-0.001", "0.001"))), 315.0);
    }

    #[test]
    fn zero_length_segment_bears_east() {
        let a = coord("0.0", "0.0");
        assert_eq!(bearing(&segment(&a, &a)), 0.0);
    }

    #[test]
    fn angle_between_wraps_around() {
        let a = coord("0.0", "0.0");
        let b = coord("-0.001", "0.001");
        let c = coord("0.0", "0.002");
        // Southeast (315°) then northeast (45°): a 90° left turn.
        let incoming = segment(&a, &b);
        let outgoing = segment(&b, &c);
        assert_almost_eq!(angle_between(&incoming, &outgoing), 90.0);
    }

    #[test]
    fn angle_between_straight_ahead() {
        let a = coord("0.0", "0.0");
        let b = coord("0.0", "0.001");
        let c = coord("0.0", "0.002");
        assert_almost_eq!(angle_between(&segment(&a, &b), &segment(&b, &c)), 0.0);
    }
}
