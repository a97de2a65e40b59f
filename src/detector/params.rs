//! Parameter types configuring the frame-resolution stages.
//!
//! Defaults reproduce the behaviour tuned on scanned 1:50,000 sheets: lines
//! within 500 px and 10° are treated as the same border, more than ten
//! border groups means the detector picked up map content, and no inward
//! offset or corner inset is applied.

use crate::corners::DEFAULT_PARALLEL_EPSILON;
use crate::error::FrameError;
use crate::lines::{AngleAveraging, ProximityThresholds};
use serde::{Deserialize, Serialize};

/// Pipeline-wide parameters. Every field has a default and can be omitted
/// from configuration files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameParams {
    /// Maximum |Δdistance| (pixels) for two detections of the same border.
    pub proximity_distance_threshold: f64,
    /// Maximum |Δangle| (radians) for two detections of the same border.
    pub proximity_angle_threshold: f64,
    /// More groups than this is reported as a tuning failure.
    pub max_groups: usize,
    /// Inward border shift in percent (0–100) of 30 % of the smaller image
    /// side. `0` skips offsetting.
    pub offset_percentage: f64,
    /// Tolerance of the parallel-line test in the intersection solver.
    pub intersection_parallel_epsilon: f64,
    /// Averaging of cluster angles.
    pub angle_averaging: AngleAveraging,
    /// Pixels to move each classified corner toward the frame interior.
    pub corner_inset_px: i32,
}

impl Default for FrameParams {
    fn default() -> Self {
        let proximity = ProximityThresholds::default();
        Self {
            proximity_distance_threshold: proximity.distance,
            proximity_angle_threshold: proximity.angle,
            max_groups: 10,
            offset_percentage: 0.0,
            intersection_parallel_epsilon: DEFAULT_PARALLEL_EPSILON,
            angle_averaging: AngleAveraging::Linear,
            corner_inset_px: 0,
        }
    }
}

impl FrameParams {
    pub fn proximity(&self) -> ProximityThresholds {
        ProximityThresholds {
            distance: self.proximity_distance_threshold,
            angle: self.proximity_angle_threshold,
        }
    }

    pub fn validate(&self) -> Result<(), FrameError> {
        if !(self.proximity_distance_threshold >= 0.0) {
            return Err(FrameError::InvalidParameter(format!(
                "proximity_distance_threshold must be >= 0, got {}",
                self.proximity_distance_threshold
            )));
        }
        if !(self.proximity_angle_threshold >= 0.0) {
            return Err(FrameError::InvalidParameter(format!(
                "proximity_angle_threshold must be >= 0, got {}",
                self.proximity_angle_threshold
            )));
        }
        if !(0.0..=100.0).contains(&self.offset_percentage) {
            return Err(FrameError::InvalidParameter(format!(
                "offset_percentage must lie in [0, 100], got {}",
                self.offset_percentage
            )));
        }
        if !(self.intersection_parallel_epsilon > 0.0) {
            return Err(FrameError::InvalidParameter(format!(
                "intersection_parallel_epsilon must be > 0, got {}",
                self.intersection_parallel_epsilon
            )));
        }
        Ok(())
    }
}
