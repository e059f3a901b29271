//! Configuration and result types for placement runs.

use crate::cfg::MAX_SAMPLES_PER_RECORD;
use crate::demand::DemandCfg;
use crate::error::SitingError;
use crate::score::ScoreParams;
use crate::types::{Coordinate, PlacedFacility};

/// Where each round looks for its starting point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CandidateSet {
    /// Demand point locations only.
    DemandPoints,
    /// Demand points, then a `resolution × resolution` grid over the boundary box
    /// (grid nodes outside the boundary are dropped).
    Grid { resolution: usize },
}

/// Tunables for one optimization run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementCfg {
    /// Gaussian decay scale for demand weights and the centrality bonus.
    pub sigma_km: f64,
    pub coverage_radius_km: f64,
    pub min_spacing_km: f64,
    /// Fixed hill-climbing step in degrees (both axes).
    pub refinement_step_deg: f64,
    pub max_refine_iterations: usize,
    /// Interior samples requested per demand record.
    pub samples_per_record: usize,
    pub seed: u64,
    pub candidates: CandidateSet,
}

impl Default for PlacementCfg {
    fn default() -> Self {
        Self {
            sigma_km: 3.0,
            coverage_radius_km: 2.5,
            min_spacing_km: 2.0,
            refinement_step_deg: 0.005,
            max_refine_iterations: 10,
            samples_per_record: 100,
            seed: 42,
            candidates: CandidateSet::DemandPoints,
        }
    }
}

impl PlacementCfg {
    pub fn validate(&self) -> Result<(), SitingError> {
        let positive = [
            ("sigma_km", self.sigma_km),
            ("coverage_radius_km", self.coverage_radius_km),
            ("refinement_step_deg", self.refinement_step_deg),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SitingError::params(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }
        if !(self.min_spacing_km.is_finite() && self.min_spacing_km >= 0.0) {
            return Err(SitingError::params(format!(
                "min_spacing_km must be finite and >= 0, got {}",
                self.min_spacing_km
            )));
        }
        if self.samples_per_record == 0 || self.samples_per_record > MAX_SAMPLES_PER_RECORD {
            return Err(SitingError::params(format!(
                "samples_per_record must be in 1..={MAX_SAMPLES_PER_RECORD}, got {}",
                self.samples_per_record
            )));
        }
        if let CandidateSet::Grid { resolution } = self.candidates {
            if resolution < 2 {
                return Err(SitingError::params(format!(
                    "grid resolution must be >= 2, got {resolution}"
                )));
            }
        }
        Ok(())
    }

    /// Demand synthesis inputs: the run's sigma, sampling budget, and seed.
    #[inline]
    pub fn demand_cfg(&self) -> DemandCfg {
        DemandCfg {
            sigma_km: self.sigma_km,
            samples_per_record: self.samples_per_record,
            seed: self.seed,
        }
    }

    #[inline]
    pub fn score_params(&self) -> ScoreParams {
        ScoreParams {
            sigma_km: self.sigma_km,
            coverage_radius_km: self.coverage_radius_km,
            min_spacing_km: self.min_spacing_km,
        }
    }
}

/// Result of a run: facilities in commit order plus run diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementOutcome {
    pub placed: Vec<PlacedFacility>,
    /// Size of the demand set the run scored against.
    pub demand_points: usize,
    /// Rounds that had no candidate and committed the region center.
    pub fallback_rounds: usize,
}

impl PlacementOutcome {
    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.placed.iter().map(|f| f.location).collect()
    }
}
