//! Greedy facility placement with bounded local refinement.
//!
//! Purpose
//! - Place `N` facilities one round at a time. Each round scans the candidate
//!   set, hill-climbs from the best candidate inside the boundary, and commits
//!   the result as an exclusion input for every later round.
//!
//! Search
//! - Candidates are the demand points themselves (`CandidateSet::DemandPoints`);
//!   a regular grid over the boundary box can be added with `CandidateSet::Grid`.
//! - Refinement is a first-improving-neighbour climb over 8 fixed offsets
//!   (4 cardinal, then 4 diagonal). Moves outside the boundary are never taken.
//! - No backtracking: committed facilities are never revisited.
//!
//! Degenerate input
//! - With no candidates a round commits the region center unrefined, so a run
//!   always yields exactly `N` coordinates.
//!
//! Split: `types.rs` (configuration and outcome), `engine.rs` (rounds and entry points).

mod engine;
mod types;

pub use engine::{optimize, optimize_with_demand, PlacementRunner};
pub use types::{CandidateSet, PlacementCfg, PlacementOutcome};
