#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod diagnostics;
pub mod error;
pub mod georef;
pub mod homography;
pub mod types;

// Stage-level modules, public for tools and tests.
pub mod angle;
pub mod config;
pub mod corners;
pub mod io;
pub mod lines;

// --- High-level re-exports -------------------------------------------------

pub use crate::detector::{FrameDetection, FrameParams, FrameResolver};
pub use crate::error::{FrameError, FrameResult};
pub use crate::georef::Georeferencer;
pub use crate::types::{
    Corner, CornerRole, GeoCoord, GroundControlPoint, ImageSize, Line, Orientation, Quadrilateral,
};

pub use crate::diagnostics::{BatchReport, FrameReport};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use map_frame::prelude::*;
///
/// # fn main() {
/// let lines = vec![
///     Line::new(50.0, 0.0),
///     Line::new(450.0, 0.0),
///     Line::new(50.0, 1.5708),
///     Line::new(450.0, 1.5708),
/// ];
/// let resolver = FrameResolver::new(FrameParams {
///     proximity_distance_threshold: 100.0,
///     ..Default::default()
/// });
/// let frame = resolver.resolve(&lines, ImageSize::new(500, 500)).unwrap();
/// let coords = [
///     GeoCoord::new(35.1, 139.1),
///     GeoCoord::new(35.1, 139.2),
///     GeoCoord::new(35.0, 139.1),
///     GeoCoord::new(35.0, 139.2),
/// ];
/// let geo = Georeferencer::fit(&frame.quad, &coords).unwrap();
/// println!("{:?}", geo.transform_lat_lon(250.0, 250.0));
/// # }
/// ```
pub mod prelude {
    pub use crate::{
        FrameError, FrameParams, FrameResolver, GeoCoord, Georeferencer, ImageSize, Line,
        Quadrilateral,
    };
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    pub use crate::corners::{classify_corners, intersect, solve_intersections};
    pub use crate::lines::{
        cluster_lines, ensure_group_limit, offset_line, representative_line, representative_lines,
        AngleAveraging, ProximityThresholds,
    };
}
