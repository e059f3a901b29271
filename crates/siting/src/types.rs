//! Value types shared by demand synthesis, scoring, and placement.
//!
//! Everything here is plain owned data; the core only ever reads it.

use nalgebra::Vector2;

use crate::geom::Polygon;

/// `(longitude, latitude)` in degrees, stored as `x = lon`, `y = lat`.
pub type Coordinate = Vector2<f64>;

/// Build a coordinate from longitude and latitude (degrees).
#[inline]
pub fn lonlat(lon: f64, lat: f64) -> Coordinate {
    Vector2::new(lon, lat)
}

/// One aggregate demand record: a sub-area and its population total.
#[derive(Clone, Debug)]
pub struct DemandRecord {
    pub polygon: Polygon,
    pub total_count: u64,
}

/// A region to place facilities in.
///
/// `centroid` is authoritative and supplied upstream; it need not equal the
/// area centroid of `boundary`.
#[derive(Clone, Debug)]
pub struct Region {
    pub name: String,
    pub centroid: Coordinate,
    pub boundary: Polygon,
    pub demand_records: Vec<DemandRecord>,
}

/// A facility that already exists; only ever an exclusion input.
#[derive(Clone, Debug, PartialEq)]
pub struct ExistingFacility {
    pub location: Coordinate,
    pub label: String,
}

/// A facility committed by one placement round.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedFacility {
    pub location: Coordinate,
}
