//! Geographic value types shared across the session coordinator.

use serde::{Deserialize, Serialize};

/// Meters spanned by one degree of latitude at the equator. Used by the
/// demo route resolver's straight-line approximation; not geodesic.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// A WGS84 point. Immutable value type; latitude in [-90, 90], longitude
/// in [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        debug_assert!((-90.0..=90.0).contains(&lat), "latitude out of range");
        debug_assert!((-180.0..=180.0).contains(&lng), "longitude out of range");
        Self { lat, lng }
    }
}

/// A coordinate plus an optional human-readable name: an origin,
/// destination, or current-location pin. Replaced wholesale on
/// re-selection, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedLocation {
    pub at: Coordinate,
    pub name: Option<String>,
}

impl NamedLocation {
    pub fn new(at: Coordinate, name: impl Into<String>) -> Self {
        Self {
            at,
            name: Some(name.into()),
        }
    }

    pub fn unnamed(at: Coordinate) -> Self {
        Self { at, name: None }
    }
}

/// Axis-aligned bounding extent of a set of coordinates, for viewport
/// framing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Extent {
    /// Bounding extent of `points`, or `None` when the slice is empty.
    pub fn of(points: &[Coordinate]) -> Option<Self> {
        let first = points.first()?;
        let mut south = first.lat;
        let mut north = first.lat;
        let mut west = first.lng;
        let mut east = first.lng;
        for point in &points[1..] {
            south = south.min(point.lat);
            north = north.max(point.lat);
            west = west.min(point.lng);
            east = east.max(point.lng);
        }
        Some(Self {
            south_west: Coordinate::new(south, west),
            north_east: Coordinate::new(north, east),
        })
    }
}
