//! Frame corners from representative border lines.
//!
//! - [`intersect`]: pairwise Cramer's-rule intersections; parallel pairs are
//!   skipped, so four borders (two near-parallel pairs) give four corners.
//! - [`classify`]: assign each intersection a role relative to the centroid
//!   and validate that the result is a proper quadrilateral.

pub mod classify;
pub mod intersect;

pub use classify::classify_corners;
pub use intersect::{intersect, solve_intersections, DEFAULT_PARALLEL_EPSILON};
