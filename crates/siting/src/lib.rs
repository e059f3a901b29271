//! Facility siting: place new facilities inside a region to cover weighted demand.
//!
//! Layout
//! - `geom`: haversine distance, winding-number containment, the `Polygon` ring type.
//! - `demand`: rejection-sampled demand points with Gaussian distance decay.
//! - `score`: the four-term location score (coverage, two exclusion penalties, centrality).
//! - `placement`: greedy rounds with bounded 8-neighbour hill climbing.
//!
//! Coordinates are `Vector2<f64>` with `x = longitude`, `y = latitude` (degrees).
//! Distances are great-circle kilometres; refinement steps are in degrees.

pub mod api;
pub mod cfg;
pub mod demand;
mod error;
pub mod geom;
pub mod placement;
pub mod score;
pub mod types;

pub use error::SitingError;
pub use types::{lonlat, Coordinate, DemandRecord, ExistingFacility, PlacedFacility, Region};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::demand::{build_weighted_demand, synthesize_demand, DemandCfg, DemandPoint};
    pub use crate::geom::{haversine_km, is_inside_polygon, BoundingBox, Polygon};
    pub use crate::placement::{
        optimize, optimize_with_demand, CandidateSet, PlacementCfg, PlacementOutcome,
        PlacementRunner,
    };
    pub use crate::score::{score, ScoreBreakdown, ScoreParams};
    pub use crate::types::{
        lonlat, Coordinate, DemandRecord, ExistingFacility, PlacedFacility, Region,
    };
    pub use crate::SitingError;
}
