//! Route geometry segmentation.
//!
//! Splits a single driving-route polyline into one segment per leg of a
//! depot → stops → depot tour, with a straight-line fallback for when no
//! provider geometry is available.
//!
//! Stops are matched to the polyline with a forward-only nearest-point
//! search. This assumes the geometry runs roughly monotonically along the
//! travel direction; a route that loops back close to an earlier stop can
//! match that stop suboptimally, but stops are always matched in travel
//! order.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::polyline::Coordinate;

/// Label used for the depot when the caller does not supply one.
pub const DEFAULT_DEPOT_NAME: &str = "Depot";

/// One leg of a route; always at least two points.
pub type Segment = Vec<Coordinate>;

/// A stop on the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub coordinates: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Waypoint {
    pub fn new(coordinates: Coordinate) -> Self {
        Self { coordinates, name: None }
    }

    pub fn named(coordinates: Coordinate, name: impl Into<String>) -> Self {
        Self {
            coordinates,
            name: Some(name.into()),
        }
    }
}

/// Start and end anchor of a route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Depot {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng, name: None }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lng, self.lat)
    }
}

/// Display names for both ends of a leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentLabel {
    pub from_name: String,
    pub to_name: String,
}

/// Partition `geometry` into `stops.len() + 1` legs.
///
/// Returns an empty list when there is no geometry. The first leg starts at
/// `geometry[0]` and the last leg ends at the final geometry point.
pub fn split_geometry_into_segments(
    geometry: &[Coordinate],
    stops: &[Waypoint],
    depot: &Depot,
) -> Vec<Segment> {
    let anchors = anchor_chain(stops, Some(depot));
    if geometry.is_empty() || anchors.len() < 2 {
        return Vec::new();
    }

    let last = geometry.len() - 1;
    let mut indices = Vec::with_capacity(anchors.len());
    let mut search_from = 0;
    for anchor in &anchors {
        let index = nearest_index_from(geometry, anchor, search_from);
        indices.push(index);
        search_from = index;
    }

    // Pin the route ends to the true geometry endpoints.
    indices[0] = 0;
    if let Some(end) = indices.last_mut() {
        *end = last;
    }
    debug!(
        anchors = anchors.len(),
        points = geometry.len(),
        ?indices,
        "matched route anchors"
    );

    indices
        .windows(2)
        .enumerate()
        .map(|(leg, pair)| {
            let (start, end) = (pair[0], pair[1]);
            if end > start {
                geometry[start..=end].to_vec()
            } else {
                trace!(leg, start, end, "degenerate leg, emitting minimal segment");
                vec![geometry[start], geometry[(start + 1).min(last)]]
            }
        })
        .collect()
}

/// Connect the anchors with straight two-point legs.
///
/// Without a depot the legs run directly between consecutive stops.
pub fn build_straight_line_segments(stops: &[Waypoint], depot: Option<&Depot>) -> Vec<Segment> {
    let anchors = anchor_chain(stops, depot);
    if anchors.len() < 2 {
        return Vec::new();
    }

    anchors.windows(2).map(|pair| vec![pair[0], pair[1]]).collect()
}

/// Pick the segmentation strategy for a route.
///
/// Provider geometry is split when both it and the depot are present;
/// otherwise straight lines are drawn.
pub fn build_route_segments(
    geometry: Option<&[Coordinate]>,
    stops: &[Waypoint],
    depot: Option<&Depot>,
) -> Vec<Segment> {
    match (geometry, depot) {
        (Some(geometry), Some(depot)) if !geometry.is_empty() => {
            split_geometry_into_segments(geometry, stops, depot)
        }
        _ => {
            debug!(
                stops = stops.len(),
                has_depot = depot.is_some(),
                "no route geometry, using straight lines"
            );
            build_straight_line_segments(stops, depot)
        }
    }
}

/// Names for the endpoints of leg `segment_index`.
///
/// Leg 0 starts at the depot and leg `stops.len()` returns to it. Stops
/// without a name are shown as `Point {n}` (1-based).
pub fn get_segment_label(segment_index: usize, stops: &[Waypoint], depot_name: &str) -> SegmentLabel {
    let from_name = match segment_index {
        0 => depot_name.to_string(),
        i => stop_name(stops, i - 1).unwrap_or_else(|| depot_name.to_string()),
    };
    let to_name = stop_name(stops, segment_index).unwrap_or_else(|| depot_name.to_string());

    SegmentLabel { from_name, to_name }
}

/// Labels for every leg of a depot-anchored route.
pub fn segment_labels(stops: &[Waypoint], depot_name: &str) -> Vec<SegmentLabel> {
    (0..=stops.len())
        .map(|index| get_segment_label(index, stops, depot_name))
        .collect()
}

fn stop_name(stops: &[Waypoint], index: usize) -> Option<String> {
    stops.get(index).map(|stop| {
        stop.name
            .clone()
            .unwrap_or_else(|| format!("Point {}", index + 1))
    })
}

fn anchor_chain(stops: &[Waypoint], depot: Option<&Depot>) -> Vec<Coordinate> {
    let mut anchors = Vec::with_capacity(stops.len() + 2);
    if let Some(depot) = depot {
        anchors.push(depot.coordinate());
    }
    anchors.extend(stops.iter().map(|stop| stop.coordinates));
    if let Some(depot) = depot {
        anchors.push(depot.coordinate());
    }
    anchors
}

/// Index of the geometry point nearest to `target`, searching from `start`.
///
/// Points with a non-finite distance are ignored. If nothing qualifies the
/// search position itself is returned.
fn nearest_index_from(geometry: &[Coordinate], target: &Coordinate, start: usize) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for (index, point) in geometry.iter().enumerate().skip(start) {
        let distance = point.distance_squared(target);
        if !distance.is_finite() {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }

    best.map(|(index, _)| index).unwrap_or(start)
}
