//! Fixed constants for distance, sampling, and scoring.
//!
//! Policy
//! - Coefficients are part of the scoring model, not tuning knobs. Tunable
//!   quantities (sigma, radii, step sizes) live in `PlacementCfg`.

/// Mean Earth radius used by `haversine_km`.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Rejection-sampling budget: attempts allowed per requested interior point.
pub const ATTEMPTS_PER_SAMPLE: usize = 100;
/// Upper bound accepted for `samples_per_record`.
pub const MAX_SAMPLES_PER_RECORD: usize = 100_000;
/// Sample buffers reserve at most this many points up front.
pub(crate) const MAX_PREALLOC_SAMPLES: usize = 4_096;

/// Coverage gain per unit of weighted demand inside the coverage radius.
pub const COVERAGE_GAIN: f64 = 2.0;
/// Penalty per km of intrusion into the spacing zone of an existing facility.
pub const EXISTING_PENALTY: f64 = 1_000.0;
/// Penalty per km of intrusion into the spacing zone of a facility placed in this run.
pub const PLACED_PENALTY: f64 = 10_000.0;
/// Peak centrality bonus (at the region center).
pub const CENTRALITY_GAIN: f64 = 100.0;

/// Minimum absolute signed area (deg²) for a ring to have a centroid.
pub(crate) const AREA_EPS: f64 = 1e-18;
