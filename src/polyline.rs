//! Coordinates and polyline route geometries.
//!
//! Geometries are handled as decoded coordinate sequences in GeoJSON order
//! (longitude first). Routing providers usually ship the compact encoded
//! polyline format, which [`Polyline::decode`] unpacks at the boundary.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Precision of the classic Google encoded polyline format.
pub const PRECISION_5: u32 = 5;

/// Precision used by OSRM and Valhalla (`polyline6`).
pub const PRECISION_6: u32 = 6;

/// A (longitude, latitude) pair in decimal degrees.
///
/// Serialized as a two-element `[lng, lat]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate(pub f64, pub f64);

impl Coordinate {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self(lng, lat)
    }

    pub fn lng(&self) -> f64 {
        self.0
    }

    pub fn lat(&self) -> f64 {
        self.1
    }

    /// Squared planar distance in degree space.
    ///
    /// Only meaningful for ranking nearby points, not as a real distance.
    pub fn distance_squared(&self, other: &Coordinate) -> f64 {
        let dx = self.0 - other.0;
        let dy = self.1 - other.1;
        dx * dx + dy * dy
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite() && self.1.is_finite()
    }
}

/// A polyline representing a route geometry as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Decodes an encoded polyline string with the given precision
    /// (number of decimal digits, usually 5 or 6).
    pub fn decode(encoded: &str, precision: u32) -> Result<Self, Error> {
        let factor = 10f64.powi(precision as i32);
        let bytes = encoded.as_bytes();
        let mut offset = 0;
        let mut lat = 0i64;
        let mut lng = 0i64;
        let mut points = Vec::new();

        while offset < bytes.len() {
            let start = offset;
            lat = lat
                .checked_add(decode_value(bytes, &mut offset)?)
                .ok_or(Error::Polyline { offset: start })?;
            if offset >= bytes.len() {
                return Err(Error::Polyline { offset });
            }
            let start = offset;
            lng = lng
                .checked_add(decode_value(bytes, &mut offset)?)
                .ok_or(Error::Polyline { offset: start })?;
            points.push(Coordinate(lng as f64 / factor, lat as f64 / factor));
        }

        Ok(Self { points })
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<Coordinate>> for Polyline {
    fn from(points: Vec<Coordinate>) -> Self {
        Self::new(points)
    }
}

/// Reads one zig-zag encoded varint starting at `offset`.
fn decode_value(bytes: &[u8], offset: &mut usize) -> Result<i64, Error> {
    let mut result = 0i64;
    let mut shift = 0u32;

    loop {
        let Some(&byte) = bytes.get(*offset) else {
            return Err(Error::Polyline { offset: *offset });
        };
        if !(63..=126).contains(&byte) || shift > 55 {
            return Err(Error::Polyline { offset: *offset });
        }
        *offset += 1;

        let chunk = (byte - 63) as i64;
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}
