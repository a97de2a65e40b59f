//! Frame resolver orchestrating the line-based corner pipeline.
//!
//! Overview
//! - Clusters the detector's polar lines into border groups (disjoint-set
//!   over the near relation) and rejects clusterings with too many groups.
//! - Averages each group into a representative border line and optionally
//!   shifts the borders toward the image interior.
//! - Intersects all pairs of border lines; parallel pairs drop out, so four
//!   borders give four candidate corners.
//! - Classifies the candidates around their centroid into a quadrilateral and
//!   optionally insets the corners onto the inner frame.
//!
//! Modules
//! - [`params`] – configuration types used by the resolver and the batch tool.
//! - `pipeline` – the [`FrameResolver`] implementation.
//!
//! Key Ideas
//! - Every stage is a pure function of its inputs; the resolver holds only
//!   parameters and can be shared across threads.
//! - Failures are typed ([`FrameError`](crate::FrameError)) and terminal for
//!   the image; batch drivers record them and continue.

pub mod params;
mod pipeline;

pub use params::FrameParams;
pub use pipeline::{FrameDetection, FrameResolver};
