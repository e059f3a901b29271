//! Demand synthesis: aggregate counts over polygons → weighted point demand.
//!
//! Model
//! - Each `(polygon, total_count)` record is spread uniformly over points drawn
//!   by rejection sampling inside the polygon's bounding box.
//! - Every point carries `raw_share = total_count / k` (k = accepted samples), so
//!   the record total is conserved no matter how many samples were accepted.
//! - `weighted_share = raw_share · exp(-d² / 2σ²)` with `d` the haversine distance
//!   to the region center.
//!
//! Determinism
//! - Each record draws from its own `StdRng`, seeded from `(seed, record_index)`,
//!   so a region's demand set depends only on the seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cfg::{ATTEMPTS_PER_SAMPLE, MAX_PREALLOC_SAMPLES};
use crate::geom::{haversine_km, Polygon};
use crate::types::{Coordinate, DemandRecord, Region};

/// Inputs of demand synthesis for one region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DemandCfg {
    pub sigma_km: f64,
    /// Interior samples requested per demand record.
    pub samples_per_record: usize,
    pub seed: u64,
}

/// One synthetic demand location.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DemandPoint {
    pub location: Coordinate,
    pub raw_share: f64,
    pub weighted_share: f64,
    pub distance_from_center: f64,
}

/// Gaussian distance decay `exp(-d² / (2σ²))`; 1 at `d = 0`.
#[inline]
pub fn gaussian_weight(distance_km: f64, sigma_km: f64) -> f64 {
    (-(distance_km * distance_km) / (2.0 * sigma_km * sigma_km)).exp()
}

/// Uniform interior points of `ring` by rejection sampling.
///
/// Stops after `target` acceptances or `ATTEMPTS_PER_SAMPLE · target` draws.
/// May return fewer than `target` points; degenerate rings yield none.
pub fn sample_interior_points<R: Rng>(
    ring: &Polygon,
    target: usize,
    rng: &mut R,
) -> Vec<Coordinate> {
    let Some(bb) = ring.bounding_box() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(target.min(MAX_PREALLOC_SAMPLES));
    let max_attempts = target.saturating_mul(ATTEMPTS_PER_SAMPLE);
    for _ in 0..max_attempts {
        if out.len() == target {
            break;
        }
        let p = bb.lerp(rng.gen::<f64>(), rng.gen::<f64>());
        if ring.contains(p) {
            out.push(p);
        }
    }
    out
}

/// Weighted demand points for one record around `center`.
///
/// Empty when the record has no population or no interior samples were found.
pub fn build_weighted_demand<R: Rng>(
    record: &DemandRecord,
    center: Coordinate,
    sigma_km: f64,
    target: usize,
    rng: &mut R,
) -> Vec<DemandPoint> {
    if record.total_count == 0 {
        return Vec::new();
    }
    let points = sample_interior_points(&record.polygon, target, rng);
    if points.is_empty() {
        tracing::warn!(
            vertices = record.polygon.len(),
            total_count = record.total_count,
            "no interior samples for demand record; skipped"
        );
        return Vec::new();
    }
    let share = record.total_count as f64 / points.len() as f64;
    points
        .into_iter()
        .map(|p| {
            let dist = haversine_km(center, p);
            DemandPoint {
                location: p,
                raw_share: share,
                weighted_share: share * gaussian_weight(dist, sigma_km),
                distance_from_center: dist,
            }
        })
        .collect()
}

/// Full demand set of a region: all records, sorted by descending weighted share.
///
/// The sort is stable; it only fixes the candidate scan order (first wins on ties).
pub fn synthesize_demand(region: &Region, cfg: &DemandCfg) -> Vec<DemandPoint> {
    let mut demand: Vec<DemandPoint> = region
        .demand_records
        .iter()
        .enumerate()
        .flat_map(|(i, record)| {
            let mut rng = record_rng(cfg.seed, i as u64);
            build_weighted_demand(
                record,
                region.centroid,
                cfg.sigma_km,
                cfg.samples_per_record,
                &mut rng,
            )
        })
        .collect();
    demand.sort_by(|a, b| b.weighted_share.total_cmp(&a.weighted_share));
    tracing::debug!(
        region = %region.name,
        records = region.demand_records.len(),
        points = demand.len(),
        "synthesized demand"
    );
    demand
}

/// Per-record RNG from `(seed, index)` via SplitMix64-style mixing.
fn record_rng(seed: u64, index: u64) -> StdRng {
    fn mix(mut x: u64) -> u64 {
        x ^= x >> 30;
        x = x.wrapping_mul(0xbf58476d1ce4e5b9);
        x ^= x >> 27;
        x = x.wrapping_mul(0x94d049bb133111eb);
        x ^ (x >> 31)
    }
    StdRng::seed_from_u64(mix(seed ^ mix(index.wrapping_add(0x9e3779b97f4a7c15))))
}
