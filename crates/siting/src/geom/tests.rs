use super::*;
use crate::types::lonlat;
use crate::SitingError;
use proptest::prelude::*;

fn unit_square() -> Polygon {
    Polygon::new(vec![
        lonlat(0.0, 0.0),
        lonlat(0.0, 1.0),
        lonlat(1.0, 1.0),
        lonlat(1.0, 0.0),
    ])
    .unwrap()
}

/// Concave "C" shape opening to the east.
fn c_shape() -> Polygon {
    Polygon::new(vec![
        lonlat(0.0, 0.0),
        lonlat(3.0, 0.0),
        lonlat(3.0, 1.0),
        lonlat(1.0, 1.0),
        lonlat(1.0, 2.0),
        lonlat(3.0, 2.0),
        lonlat(3.0, 3.0),
        lonlat(0.0, 3.0),
    ])
    .unwrap()
}

#[test]
fn haversine_known_distances() {
    // One degree of latitude is ~111.19 km on a 6371 km sphere.
    let d = haversine_km(lonlat(0.0, 0.0), lonlat(0.0, 1.0));
    assert!((d - 111.195).abs() < 1e-2, "d={d}");
    // Paris to London is about 344 km.
    let paris = lonlat(2.3522, 48.8566);
    let london = lonlat(-0.1278, 51.5074);
    let d = haversine_km(paris, london);
    assert!((d - 343.5).abs() < 2.0, "d={d}");
    // Antipodes: half the circumference.
    let d = haversine_km(lonlat(0.0, 0.0), lonlat(180.0, 0.0));
    assert!((d - std::f64::consts::PI * 6371.0).abs() < 1e-6);
}

#[test]
fn winding_square_and_orientation() {
    let sq = unit_square();
    assert!(sq.contains(lonlat(0.5, 0.5)));
    assert!(!sq.contains(lonlat(1.5, 0.5)));
    assert!(!sq.contains(lonlat(0.5, -0.1)));
    // Clockwise and counterclockwise rings wind with opposite signs.
    let cw = winding_number(lonlat(0.5, 0.5), sq.vertices());
    let mut rev = sq.vertices().to_vec();
    rev.reverse();
    let ccw = winding_number(lonlat(0.5, 0.5), &rev);
    assert_eq!(cw, -ccw);
    assert_eq!(cw.abs(), 1);
}

#[test]
fn winding_concave_notch_is_outside() {
    let c = c_shape();
    assert!(c.contains(lonlat(0.5, 1.5)));
    assert!(c.contains(lonlat(2.0, 0.5)));
    assert!(c.contains(lonlat(2.0, 2.5)));
    // Inside the bounding box, but in the notch.
    assert!(!c.contains(lonlat(2.0, 1.5)));
}

#[test]
fn explicit_closing_vertex_is_dropped() {
    let p = Polygon::new(vec![
        lonlat(0.0, 0.0),
        lonlat(1.0, 0.0),
        lonlat(1.0, 1.0),
        lonlat(0.0, 0.0),
    ])
    .unwrap();
    assert_eq!(p.len(), 3);
    assert!(p.contains(lonlat(0.7, 0.3)));
}

#[test]
fn degenerate_rings_contain_nothing() {
    let two = [lonlat(0.0, 0.0), lonlat(1.0, 1.0)];
    assert!(!is_inside_polygon(lonlat(0.5, 0.5), &two));
    assert!(!is_inside_polygon(lonlat(0.5, 0.5), &[]));
    // Collinear ring: zero area, still no interior.
    let line = Polygon::from_unchecked(vec![
        lonlat(0.0, 0.0),
        lonlat(1.0, 1.0),
        lonlat(2.0, 2.0),
    ]);
    assert!(!line.contains(lonlat(1.0, 1.0)));
    assert!(!line.contains(lonlat(1.0, 0.5)));
}

#[test]
fn constructor_rejects_short_or_nonfinite_rings() {
    let short = Polygon::new(vec![lonlat(0.0, 0.0), lonlat(1.0, 0.0)]);
    assert!(matches!(short, Err(SitingError::InvalidGeometry { .. })));
    let repeated = Polygon::new(vec![
        lonlat(0.0, 0.0),
        lonlat(1.0, 0.0),
        lonlat(1.0, 0.0),
        lonlat(0.0, 0.0),
    ]);
    assert!(matches!(repeated, Err(SitingError::InvalidGeometry { .. })));
    let nan = Polygon::new(vec![
        lonlat(0.0, 0.0),
        lonlat(f64::NAN, 0.0),
        lonlat(1.0, 1.0),
    ]);
    assert!(nan.is_err());
}

#[test]
fn distinct_vertex_count_ignores_repeats() {
    let ring = Polygon::from_unchecked(vec![
        lonlat(0.0, 0.0),
        lonlat(1.0, 0.0),
        lonlat(1.0, 0.0),
        lonlat(0.0, 0.0),
    ]);
    assert_eq!(ring.len(), 4);
    assert_eq!(ring.distinct_vertex_count(), 2);
    assert_eq!(unit_square().distinct_vertex_count(), 4);
}

#[test]
fn centroid_and_area() {
    let sq = unit_square();
    let c = sq.area_centroid().unwrap();
    assert!((c - lonlat(0.5, 0.5)).norm() < 1e-12);
    assert!((sq.signed_area().abs() - 1.0).abs() < 1e-12);
    let bb = sq.bounding_box().unwrap();
    assert_eq!(bb.min, lonlat(0.0, 0.0));
    assert_eq!(bb.max, lonlat(1.0, 1.0));
    assert_eq!(bb.lerp(0.25, 0.75), lonlat(0.25, 0.75));

    let tri = Polygon::from_unchecked(vec![lonlat(10.0, 10.0), lonlat(13.0, 10.0), lonlat(10.0, 13.0)]);
    let c = tri.area_centroid().unwrap();
    assert!((c - lonlat(11.0, 11.0)).norm() < 1e-12);

    let line = Polygon::from_unchecked(vec![lonlat(0.0, 0.0), lonlat(1.0, 1.0), lonlat(2.0, 2.0)]);
    assert!(matches!(
        line.area_centroid(),
        Err(SitingError::InvalidGeometry { .. })
    ));
    let short = Polygon::from_unchecked(vec![lonlat(0.0, 0.0), lonlat(1.0, 1.0)]);
    assert!(short.area_centroid().is_err());
    assert!(Polygon::from_unchecked(Vec::new()).bounding_box().is_none());
}

fn coord() -> impl Strategy<Value = crate::types::Coordinate> {
    (-179.0f64..179.0, -85.0f64..85.0).prop_map(|(lon, lat)| lonlat(lon, lat))
}

/// Convex ring: sorted angles around a center, constant radius.
fn convex_ring() -> impl Strategy<Value = Vec<crate::types::Coordinate>> {
    (
        -170.0f64..170.0,
        -80.0f64..80.0,
        0.01f64..5.0,
        prop::collection::vec(0.0f64..std::f64::consts::TAU, 3..16),
    )
        .prop_filter_map("needs spread angles", |(cx, cy, r, mut th)| {
            th.sort_by(|a, b| a.total_cmp(b));
            th.dedup_by(|a, b| (*a - *b).abs() < 1e-3);
            if th.len() < 3 {
                return None;
            }
            // Reject rings whose vertices all sit on one half circle: too thin to be robust.
            let max_gap = th
                .windows(2)
                .map(|w| w[1] - w[0])
                .chain(std::iter::once(th[0] + std::f64::consts::TAU - th[th.len() - 1]))
                .fold(0.0, f64::max);
            if max_gap > 0.9 * std::f64::consts::PI {
                return None;
            }
            Some(
                th.into_iter()
                    .map(|t| lonlat(cx + r * t.cos(), cy + r * t.sin()))
                    .collect(),
            )
        })
}

proptest! {
    #[test]
    fn haversine_is_symmetric_and_zero_on_diagonal(a in coord(), b in coord()) {
        prop_assert_eq!(haversine_km(a, a), 0.0);
        let ab = haversine_km(a, b);
        let ba = haversine_km(b, a);
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - ba).abs() <= 1e-9 * ab.max(1.0));
    }

    #[test]
    fn convex_centroid_is_inside(ring in convex_ring()) {
        let poly = Polygon::new(ring).unwrap();
        let c = poly.area_centroid().unwrap();
        prop_assert!(poly.contains(c));
    }
}
