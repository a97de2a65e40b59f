//! Border-line reduction: from raw Hough detections to one line per border.
//!
//! A Hough transform over a scanned map sheet reports each physical frame
//! edge several times (thick strokes, scan noise, the double outer/inner
//! frame). This module collapses those detections:
//!
//! - [`cluster`]: group lines that are close in both distance and angle into
//!   border clusters via a disjoint-set over the "near" relation.
//! - [`representative`]: average each cluster into a single representative
//!   line.
//! - [`offset`]: optionally shift border lines toward the image interior.
//!
//! All functions are pure and operate on borrowed slices; nothing here keeps
//! state between images.

pub mod cluster;
pub mod offset;
pub mod representative;

pub use cluster::{cluster_lines, ensure_group_limit, DisjointSet, ProximityThresholds};
pub use offset::{offset_line, offset_lines, offset_magnitude};
pub use representative::{representative_line, representative_lines, AngleAveraging};
