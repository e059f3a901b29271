//! Location score: coverage + centrality minus spacing penalties.
//!
//! All terms are soft. A candidate that violates minimum spacing can still win
//! when its coverage dominates; spacing is never a hard rejection.

use crate::cfg::{CENTRALITY_GAIN, COVERAGE_GAIN, EXISTING_PENALTY, PLACED_PENALTY};
use crate::demand::DemandPoint;
use crate::geom::haversine_km;
use crate::types::{Coordinate, ExistingFacility, PlacedFacility};

/// Distance scales (km) entering the score.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoreParams {
    pub sigma_km: f64,
    pub coverage_radius_km: f64,
    pub min_spacing_km: f64,
}

/// Individual score terms. Penalties are stored as non-positive values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub coverage: f64,
    pub existing_penalty: f64,
    pub placed_penalty: f64,
    pub centrality: f64,
}

impl ScoreBreakdown {
    #[inline]
    pub fn total(&self) -> f64 {
        self.coverage + self.existing_penalty + self.placed_penalty + self.centrality
    }
}

/// Scalar desirability of `candidate`. Pure; see `score_breakdown` for the terms.
#[inline]
pub fn score(
    candidate: Coordinate,
    demand: &[DemandPoint],
    existing: &[ExistingFacility],
    placed: &[PlacedFacility],
    center: Coordinate,
    params: &ScoreParams,
) -> f64 {
    score_breakdown(candidate, demand, existing, placed, center, params).total()
}

/// Term-by-term score of `candidate`.
///
/// 1. coverage: `Σ 2·w·exp(-d/R)` over demand with `d <= R` (hard cutoff at R).
/// 2. existing: `-1000·(s - d)` per existing facility with `d < s`.
/// 3. placed: `-10000·(s - d)` per facility placed in this run with `d < s`.
/// 4. centrality: `100·exp(-d_center / 2σ)`.
pub fn score_breakdown(
    candidate: Coordinate,
    demand: &[DemandPoint],
    existing: &[ExistingFacility],
    placed: &[PlacedFacility],
    center: Coordinate,
    params: &ScoreParams,
) -> ScoreBreakdown {
    let radius = params.coverage_radius_km;
    let coverage: f64 = demand
        .iter()
        .filter_map(|dp| {
            let d = haversine_km(candidate, dp.location);
            (d <= radius).then(|| COVERAGE_GAIN * dp.weighted_share * (-d / radius).exp())
        })
        .sum();

    let existing_penalty = -EXISTING_PENALTY
        * spacing_intrusion(candidate, existing.iter().map(|f| f.location), params.min_spacing_km);
    let placed_penalty = -PLACED_PENALTY
        * spacing_intrusion(candidate, placed.iter().map(|f| f.location), params.min_spacing_km);

    let d_center = haversine_km(candidate, center);
    let centrality = CENTRALITY_GAIN * (-d_center / (2.0 * params.sigma_km)).exp();

    ScoreBreakdown {
        coverage,
        existing_penalty,
        placed_penalty,
        centrality,
    }
}

/// Sum of `(s - d)` over sites strictly closer than `s`.
fn spacing_intrusion(
    candidate: Coordinate,
    sites: impl Iterator<Item = Coordinate>,
    min_spacing_km: f64,
) -> f64 {
    sites
        .map(|site| haversine_km(candidate, site))
        .filter(|&d| d < min_spacing_km)
        .map(|d| min_spacing_km - d)
        .sum()
}
