//! Placement rounds: candidate scan, 8-neighbour refinement, commit.

use nalgebra::Vector2;

use crate::cfg::AREA_EPS;
use crate::demand::{synthesize_demand, DemandPoint};
use crate::error::SitingError;
use crate::geom::Polygon;
use crate::score::{score, ScoreParams};
use crate::types::{Coordinate, ExistingFacility, PlacedFacility, Region};

use super::types::{CandidateSet, PlacementCfg, PlacementOutcome};

/// Unit offsets tried in order: cardinal first, then diagonal.
const NEIGHBOR_OFFSETS: [(f64, f64); 8] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (1.0, 1.0),
    (1.0, -1.0),
    (-1.0, 1.0),
    (-1.0, -1.0),
];

/// Place `facility_count` facilities in `region`; returns them in commit order.
///
/// Synthesizes demand once from the region's records, then runs the greedy rounds.
pub fn optimize(
    region: &Region,
    facility_count: usize,
    existing: &[ExistingFacility],
    cfg: &PlacementCfg,
) -> Result<Vec<Coordinate>, SitingError> {
    validate_inputs(region, facility_count, cfg)?;
    let demand = synthesize_demand(region, &cfg.demand_cfg());
    let outcome = optimize_with_demand(region, &demand, existing, facility_count, cfg)?;
    Ok(outcome.coordinates())
}

/// Run all rounds against a precomputed demand set.
pub fn optimize_with_demand(
    region: &Region,
    demand: &[DemandPoint],
    existing: &[ExistingFacility],
    facility_count: usize,
    cfg: &PlacementCfg,
) -> Result<PlacementOutcome, SitingError> {
    let mut runner = PlacementRunner::new(region, demand, existing, facility_count, *cfg)?;
    while runner.next_round().is_some() {}
    Ok(runner.finish())
}

fn validate_inputs(
    region: &Region,
    facility_count: usize,
    cfg: &PlacementCfg,
) -> Result<(), SitingError> {
    if facility_count == 0 {
        return Err(SitingError::params("facility_count must be > 0"));
    }
    let distinct = region.boundary.distinct_vertex_count();
    if distinct < 3 {
        return Err(SitingError::geometry(format!(
            "region '{}' boundary needs at least 3 distinct vertices, got {distinct}",
            region.name
        )));
    }
    if region.boundary.signed_area().abs() < AREA_EPS {
        return Err(SitingError::geometry(format!(
            "region '{}' boundary encloses no area",
            region.name
        )));
    }
    if !(region.centroid.x.is_finite() && region.centroid.y.is_finite()) {
        return Err(SitingError::geometry(format!(
            "region '{}' centroid is not finite",
            region.name
        )));
    }
    cfg.validate()
}

/// Stepwise placement run.
///
/// Each `next_round` commits exactly one facility. Between rounds `placed()`
/// is always a valid partial result, so callers may stop early.
pub struct PlacementRunner<'a> {
    boundary: &'a Polygon,
    center: Coordinate,
    demand: &'a [DemandPoint],
    existing: &'a [ExistingFacility],
    cfg: PlacementCfg,
    params: ScoreParams,
    candidates: Vec<Coordinate>,
    target: usize,
    placed: Vec<PlacedFacility>,
    fallback_rounds: usize,
}

impl<'a> PlacementRunner<'a> {
    pub fn new(
        region: &'a Region,
        demand: &'a [DemandPoint],
        existing: &'a [ExistingFacility],
        facility_count: usize,
        cfg: PlacementCfg,
    ) -> Result<Self, SitingError> {
        validate_inputs(region, facility_count, &cfg)?;
        let candidates = build_candidates(&region.boundary, demand, cfg.candidates);
        tracing::debug!(
            region = %region.name,
            demand = demand.len(),
            candidates = candidates.len(),
            facility_count,
            "placement run"
        );
        Ok(Self {
            boundary: &region.boundary,
            center: region.centroid,
            demand,
            existing,
            cfg,
            params: cfg.score_params(),
            candidates,
            target: facility_count,
            placed: Vec::with_capacity(facility_count),
            fallback_rounds: 0,
        })
    }

    /// Facilities committed so far, in commit order.
    #[inline]
    pub fn placed(&self) -> &[PlacedFacility] {
        &self.placed
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.placed.len() >= self.target
    }

    /// Run one round and commit its facility; `None` once all rounds are done.
    pub fn next_round(&mut self) -> Option<PlacedFacility> {
        if self.is_done() {
            return None;
        }
        let round = self.placed.len();
        let location = match self.best_candidate() {
            Some((start, start_score)) => {
                let (loc, val, steps) = self.refine(start, start_score);
                tracing::debug!(
                    round,
                    lon = loc.x,
                    lat = loc.y,
                    score = val,
                    steps,
                    "placed facility"
                );
                loc
            }
            None => {
                self.fallback_rounds += 1;
                tracing::info!(round, "no candidates; falling back to region center");
                self.center
            }
        };
        let facility = PlacedFacility { location };
        self.placed.push(facility);
        Some(facility)
    }

    pub fn finish(self) -> PlacementOutcome {
        PlacementOutcome {
            placed: self.placed,
            demand_points: self.demand.len(),
            fallback_rounds: self.fallback_rounds,
        }
    }

    #[inline]
    fn eval(&self, p: Coordinate) -> f64 {
        score(
            p,
            self.demand,
            self.existing,
            &self.placed,
            self.center,
            &self.params,
        )
    }

    /// Highest-scoring candidate; the first one wins ties.
    fn best_candidate(&self) -> Option<(Coordinate, f64)> {
        let mut best: Option<(Coordinate, f64)> = None;
        for &c in &self.candidates {
            let val = self.eval(c);
            if best.as_ref().is_none_or(|(_, v)| val > *v) {
                best = Some((c, val));
            }
        }
        best
    }

    /// First-improving 8-neighbour climb at a fixed step, inside the boundary.
    ///
    /// Returns the final point, its score, and the number of moves taken.
    fn refine(&self, start: Coordinate, start_score: f64) -> (Coordinate, f64, usize) {
        let step = self.cfg.refinement_step_deg;
        let mut cur = start;
        let mut cur_score = start_score;
        let mut steps = 0;
        for _ in 0..self.cfg.max_refine_iterations {
            let mut moved = false;
            for (dx, dy) in NEIGHBOR_OFFSETS {
                let next = cur + Vector2::new(dx, dy) * step;
                if !self.boundary.contains(next) {
                    continue;
                }
                let val = self.eval(next);
                if val > cur_score {
                    cur = next;
                    cur_score = val;
                    moved = true;
                    break;
                }
            }
            if !moved {
                break;
            }
            steps += 1;
        }
        (cur, cur_score, steps)
    }
}

/// Candidate starting points in scan order.
///
/// Points outside the boundary are dropped so every refined result stays inside.
fn build_candidates(
    boundary: &Polygon,
    demand: &[DemandPoint],
    set: CandidateSet,
) -> Vec<Coordinate> {
    let mut out: Vec<Coordinate> = demand
        .iter()
        .map(|dp| dp.location)
        .filter(|p| boundary.contains(*p))
        .collect();
    if let CandidateSet::Grid { resolution } = set {
        if let Some(bb) = boundary.bounding_box() {
            let denom = (resolution - 1) as f64;
            for i in 0..resolution {
                for j in 0..resolution {
                    let p = bb.lerp(i as f64 / denom, j as f64 / denom);
                    if boundary.contains(p) {
                        out.push(p);
                    }
                }
            }
        }
    }
    out
}
