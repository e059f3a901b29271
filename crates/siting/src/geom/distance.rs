use crate::cfg::EARTH_RADIUS_KM;
use crate::types::Coordinate;

/// Great-circle distance in km between two `(lon, lat)` coordinates.
///
/// `d = 2R asin(sqrt(sin²(Δlat/2) + cos(lat1) cos(lat2) sin²(Δlon/2)))`.
#[inline]
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let dlat = (b.y - a.y).to_radians();
    let dlon = (b.x - a.x).to_radians();
    let h = (dlat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon * 0.5).sin().powi(2);
    // Rounding can push h marginally above 1 for antipodal points.
    2.0 * EARTH_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
}
