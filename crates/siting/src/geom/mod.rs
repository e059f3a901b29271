//! Geometry kernel: great-circle distance and polygon containment.
//!
//! Purpose
//! - Keep every geometric predicate an in-memory pure function so the search
//!   loop never suspends or performs I/O mid-algorithm.
//! - Treat rings as implicitly closed; callers may or may not repeat the first vertex.
//!
//! Conventions
//! - Containment is planar in (lon, lat) degrees; distance is haversine in km.
//! - Degenerate rings (< 3 vertices) are "outside" for every point. Only
//!   centroid/area queries turn them into `SitingError::InvalidGeometry`.

mod distance;
mod polygon;

pub use distance::haversine_km;
pub use polygon::{is_inside_polygon, winding_number, BoundingBox, Polygon};

#[cfg(test)]
mod tests;
