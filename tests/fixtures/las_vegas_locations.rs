//! Real Las Vegas / Henderson locations for route geometry fixtures.
//!
//! Coordinates sourced from OpenStreetMap via Overpass API.

use fieldops_core::geometry::{Depot, Waypoint};
use fieldops_core::polyline::Coordinate;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lng, self.lat)
    }

    pub fn waypoint(&self) -> Waypoint {
        Waypoint::named(self.coordinate(), self.name)
    }

    pub fn depot(&self) -> Depot {
        Depot {
            lat: self.lat,
            lng: self.lng,
            name: Some(self.name.to_string()),
        }
    }
}

pub const DEPOT: Location = Location::new("MGM Grand", 36.1023654, -115.1688720);

/// Stops spread across the metro area, in visiting order.
pub const ROUTE_STOPS: &[Location] = &[
    Location::new("Bootlegger Bistro", 36.0492047, -115.1715744),
    Location::new("Budget Suites South", 36.0366259, -115.1713361),
    Location::new("Green Valley Ranch Area", 36.0308, -115.0825),
    Location::new("Sunset Station Area", 36.0614, -115.0631),
    Location::new("Longhorn Casino", 36.1070664, -115.0591256),
    Location::new("Rivas Mexican Grill North", 36.1450055, -115.0482587),
    Location::new("Beers and Bets", 36.1428945, -115.1573836),
    Location::new("Wynn Las Vegas", 36.1263781, -115.1658180),
];

pub fn route_waypoints(count: usize) -> Vec<Waypoint> {
    ROUTE_STOPS.iter().take(count).map(Location::waypoint).collect()
}

/// Fake driving geometry through `anchors`: each leg is a straight line with
/// `points_per_leg` interior points. Every anchor is a geometry vertex.
pub fn interpolated_route(anchors: &[Coordinate], points_per_leg: usize) -> Vec<Coordinate> {
    let mut geometry = Vec::new();
    for pair in anchors.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let steps = points_per_leg + 1;
        for step in 0..steps {
            let t = step as f64 / steps as f64;
            geometry.push(Coordinate::new(
                from.lng() + (to.lng() - from.lng()) * t,
                from.lat() + (to.lat() - from.lat()) * t,
            ));
        }
    }
    if let Some(last) = anchors.last() {
        geometry.push(*last);
    }
    geometry
}

/// Anchor chain for a depot-based tour.
pub fn tour_anchors(depot: &Location, stops: &[Waypoint]) -> Vec<Coordinate> {
    let mut anchors = vec![depot.coordinate()];
    anchors.extend(stops.iter().map(|stop| stop.coordinates));
    anchors.push(depot.coordinate());
    anchors
}
