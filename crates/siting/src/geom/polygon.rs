use nalgebra::Vector2;

use crate::cfg::AREA_EPS;
use crate::error::SitingError;
use crate::types::Coordinate;

/// Axis-aligned bounding box in (lon, lat) degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: Coordinate,
    pub max: Coordinate,
}

impl BoundingBox {
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
    /// Point at fractional position `(u, v)` in `[0,1]²`.
    #[inline]
    pub fn lerp(&self, u: f64, v: f64) -> Coordinate {
        Vector2::new(self.min.x + u * self.width(), self.min.y + v * self.height())
    }
}

fn distinct_count(verts: &[Coordinate]) -> usize {
    let mut sorted = verts.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then_with(|| a.y.total_cmp(&b.y)));
    sorted.dedup();
    sorted.len()
}

/// Closed ring of `(lon, lat)` vertices; the last vertex connects back to the first.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    verts: Vec<Coordinate>,
}

impl Polygon {
    /// Validating constructor: at least 3 distinct, finite vertices.
    ///
    /// An explicit closing vertex (equal to the first) is dropped.
    pub fn new(mut verts: Vec<Coordinate>) -> Result<Self, SitingError> {
        if verts.len() > 1 && verts.first() == verts.last() {
            verts.pop();
        }
        if verts.iter().any(|v| !(v.x.is_finite() && v.y.is_finite())) {
            return Err(SitingError::geometry("ring has non-finite coordinates"));
        }
        let distinct = distinct_count(&verts);
        if distinct < 3 {
            return Err(SitingError::geometry(format!(
                "ring needs at least 3 distinct vertices, got {distinct}"
            )));
        }
        Ok(Self { verts })
    }

    /// Wrap vertices without validation. Degenerate rings are tolerated by
    /// containment and sampling (they contain nothing).
    pub fn from_unchecked(verts: Vec<Coordinate>) -> Self {
        Self { verts }
    }

    #[inline]
    pub fn vertices(&self) -> &[Coordinate] {
        &self.verts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// Number of pairwise distinct vertices.
    pub fn distinct_vertex_count(&self) -> usize {
        distinct_count(&self.verts)
    }

    #[inline]
    pub fn contains(&self, p: Coordinate) -> bool {
        is_inside_polygon(p, &self.verts)
    }

    /// Bounding box of the vertices, `None` for an empty ring.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = *self.verts.first()?;
        let (min, max) = self
            .verts
            .iter()
            .fold((first, first), |(lo, hi), v| (lo.inf(v), hi.sup(v)));
        Some(BoundingBox { min, max })
    }

    /// Planar shoelace area in deg²; positive for counterclockwise rings.
    pub fn signed_area(&self) -> f64 {
        let n = self.verts.len();
        if n < 3 {
            return 0.0;
        }
        let o = self.verts[0];
        let mut a = 0.0;
        for i in 0..n {
            let p = self.verts[i] - o;
            let q = self.verts[(i + 1) % n] - o;
            a += p.x * q.y - q.x * p.y;
        }
        0.5 * a
    }

    /// Planar area centroid (either orientation).
    ///
    /// Errors with `InvalidGeometry` for fewer than 3 vertices or zero area.
    pub fn area_centroid(&self) -> Result<Coordinate, SitingError> {
        let n = self.verts.len();
        if n < 3 {
            return Err(SitingError::geometry(format!(
                "centroid needs at least 3 vertices, got {n}"
            )));
        }
        // Accumulate relative to the first vertex to keep products small.
        let o = self.verts[0];
        let mut a = 0.0;
        let mut c = Vector2::zeros();
        for i in 0..n {
            let p = self.verts[i] - o;
            let q = self.verts[(i + 1) % n] - o;
            let cross = p.x * q.y - q.x * p.y;
            a += cross;
            c += (p + q) * cross;
        }
        a *= 0.5;
        if a.abs() < AREA_EPS {
            return Err(SitingError::geometry("ring has zero area"));
        }
        Ok(o + c / (6.0 * a))
    }
}

/// `> 0` if `p` is left of the directed line `a → b`, `< 0` if right.
#[inline]
fn is_left(a: Coordinate, b: Coordinate, p: Coordinate) -> f64 {
    let ab = b - a;
    let ap = p - a;
    ab.x * ap.y - ab.y * ap.x
}

/// Winding number of `ring` (implicitly closed) around `p`.
///
/// Upward edges (`y_i <= p.y < y_{i+1}`) with `p` strictly left count +1;
/// downward edges (`y_i > p.y >= y_{i+1}`) with `p` strictly right count -1.
/// Rings with fewer than 3 vertices wind zero times around everything.
pub fn winding_number(p: Coordinate, ring: &[Coordinate]) -> i32 {
    let n = ring.len();
    if n < 3 {
        return 0;
    }
    let mut wn = 0;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if a.y <= p.y {
            if b.y > p.y && is_left(a, b, p) > 0.0 {
                wn += 1;
            }
        } else if b.y <= p.y && is_left(a, b, p) < 0.0 {
            wn -= 1;
        }
    }
    wn
}

/// Winding-number containment. Boundary points are implementation-defined.
#[inline]
pub fn is_inside_polygon(p: Coordinate, ring: &[Coordinate]) -> bool {
    winding_number(p, ring) != 0
}
