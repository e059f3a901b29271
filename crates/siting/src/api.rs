//! Curated entry points for the CLI and experiments (UNSTABLE).
//!
//! Not a stable public API. Prefer these re-exports for consistency across
//! call sites; breaking changes are allowed.

// Geometry kernel
pub use crate::geom::{
    haversine_km, is_inside_polygon, winding_number, BoundingBox, Polygon,
};
// Demand synthesis
pub use crate::demand::{
    build_weighted_demand, gaussian_weight, sample_interior_points, synthesize_demand,
    DemandCfg, DemandPoint,
};
// Scoring
pub use crate::score::{score, score_breakdown, ScoreBreakdown, ScoreParams};
// Placement
pub use crate::placement::{
    optimize, optimize_with_demand, CandidateSet, PlacementCfg, PlacementOutcome,
    PlacementRunner,
};
