//! Great-circle distances for route legs.
//!
//! Used to annotate segments with a length. Ignores elevation and
//! treats the earth as a sphere, which is plenty for leg summaries.

use crate::polyline::Coordinate;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculate haversine distance between two points in kilometers.
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let lat1_rad = from.lat().to_radians();
    let lat2_rad = to.lat().to_radians();
    let delta_lat = (to.lat() - from.lat()).to_radians();
    let delta_lng = (to.lng() - from.lng()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Length of a segment (sum of its consecutive point distances).
///
/// Non-finite hops are skipped so one bad point cannot poison the total.
pub fn segment_length_km(segment: &[Coordinate]) -> f64 {
    segment
        .windows(2)
        .map(|pair| haversine_km(pair[0], pair[1]))
        .filter(|km| km.is_finite())
        .sum()
}

/// Lengths for a list of segments, in order.
pub fn segment_lengths_km(segments: &[Vec<Coordinate>]) -> Vec<f64> {
    segments.iter().map(|segment| segment_length_km(segment)).collect()
}
