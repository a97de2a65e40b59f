//! Frame resolver driving the geometric pipeline end-to-end.
//!
//! Typical usage:
//! ```no_run
//! use map_frame::{FrameParams, FrameResolver, ImageSize, Line};
//!
//! # fn example(lines: Vec<Line>) {
//! let resolver = FrameResolver::new(FrameParams::default());
//! match resolver.resolve(&lines, ImageSize::new(8000, 6000)) {
//!     Ok(detection) => println!("frame: {:?}", detection.quad),
//!     Err(err) => eprintln!("skipped: {err}"),
//! }
//! # }
//! ```

use super::params::FrameParams;
use crate::corners::{classify_corners, solve_intersections};
use crate::diagnostics::{FrameReport, FrameTrace, InputDescriptor};
use crate::error::FrameError;
use crate::georef::Georeferencer;
use crate::lines::{cluster_lines, ensure_group_limit, offset_lines, representative_lines};
use crate::types::{GeoCoord, ImageSize, Line, Quadrilateral};
use log::{debug, warn};
use serde::Serialize;
use std::time::Instant;

/// Resolved frame of one image.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameDetection {
    /// Final corners, after the configured inset.
    pub quad: Quadrilateral,
    /// Corners as classified from the border intersections.
    pub raw_quad: Quadrilateral,
    /// The border lines the corners were intersected from.
    pub border_lines: Vec<Line>,
}

/// Stateless pipeline: raw lines → clusters → representatives → (offset) →
/// intersections → classified corners → (inset).
///
/// Holds only its parameters, so one resolver can serve many images, also
/// from several threads at once.
#[derive(Clone, Debug, Default)]
pub struct FrameResolver {
    params: FrameParams,
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

impl FrameResolver {
    pub fn new(params: FrameParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &FrameParams {
        &self.params
    }

    /// Resolves the frame corners from the detector's lines.
    pub fn resolve(&self, lines: &[Line], size: ImageSize) -> Result<FrameDetection, FrameError> {
        let mut trace = FrameTrace::default();
        self.run(lines, size, &mut trace)
    }

    /// Like [`resolve`](Self::resolve) but also returns every intermediate
    /// product and stage timings, including for failed runs.
    pub fn resolve_detailed(&self, lines: &[Line], size: ImageSize) -> FrameReport {
        let total_start = Instant::now();
        let mut trace = FrameTrace {
            input: InputDescriptor {
                line_count: lines.len(),
                width: size.width,
                height: size.height,
            },
            ..Default::default()
        };
        let outcome = self.run(lines, size, &mut trace);
        trace.timings.total_ms = elapsed_ms(total_start);
        match outcome {
            Ok(detection) => FrameReport {
                detection: Some(detection),
                error: None,
                trace,
            },
            Err(err) => FrameReport {
                detection: None,
                error: Some(err.to_string()),
                trace,
            },
        }
    }

    /// Fits the pixel → geographic transform for a resolved frame.
    pub fn georeference(
        &self,
        detection: &FrameDetection,
        coords: &[GeoCoord],
    ) -> Result<Georeferencer, FrameError> {
        Georeferencer::fit(&detection.quad, coords)
    }

    fn run(
        &self,
        lines: &[Line],
        size: ImageSize,
        trace: &mut FrameTrace,
    ) -> Result<FrameDetection, FrameError> {
        let result = self.run_stages(lines, size, trace);
        if let Err(err) = &result {
            warn!("frame resolution failed: {err}");
        }
        result
    }

    fn run_stages(
        &self,
        lines: &[Line],
        size: ImageSize,
        trace: &mut FrameTrace,
    ) -> Result<FrameDetection, FrameError> {
        self.params.validate()?;
        if lines.is_empty() {
            return Err(FrameError::EmptyInput);
        }
        if let Some(i) = lines.iter().position(|l| !l.is_finite()) {
            return Err(FrameError::InvalidParameter(format!(
                "line {i} has non-finite components"
            )));
        }

        let start = Instant::now();
        let groups = cluster_lines(lines, &self.params.proximity());
        trace.timings.push("cluster", elapsed_ms(start));
        trace.groups = groups.clone();
        ensure_group_limit(&groups, self.params.max_groups)?;

        let start = Instant::now();
        let representatives = representative_lines(lines, &groups, self.params.angle_averaging);
        trace.timings.push("representatives", elapsed_ms(start));
        trace.representatives = representatives.clone();
        debug!(
            "resolve: {} lines -> {} border groups",
            lines.len(),
            representatives.len()
        );

        let border_lines = if self.params.offset_percentage > 0.0 {
            let start = Instant::now();
            let shifted = offset_lines(&representatives, self.params.offset_percentage, size);
            trace.timings.push("offset", elapsed_ms(start));
            shifted
        } else {
            representatives
        };
        trace.border_lines = border_lines.clone();

        let start = Instant::now();
        let intersections =
            solve_intersections(&border_lines, self.params.intersection_parallel_epsilon);
        trace.timings.push("intersections", elapsed_ms(start));
        trace.intersections = intersections.clone();
        debug!("resolve: {} intersections", intersections.len());

        let start = Instant::now();
        let raw_quad = classify_corners(&intersections)?;
        trace.timings.push("classify", elapsed_ms(start));

        let quad = if self.params.corner_inset_px != 0 {
            raw_quad.inset(self.params.corner_inset_px)
        } else {
            raw_quad
        };
        Ok(FrameDetection {
            quad,
            raw_quad,
            border_lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Corner;

    const SIZE: ImageSize = ImageSize::new(500, 500);

    // Opposite borders of this small frame are 400 px apart, inside the
    // default 500 px proximity, so the tests tighten it.
    fn small_frame_params() -> FrameParams {
        FrameParams {
            proximity_distance_threshold: 100.0,
            ..Default::default()
        }
    }

    fn square_lines() -> Vec<Line> {
        vec![
            Line::new(50.0, 0.0),
            Line::new(450.0, 0.0),
            Line::new(50.0, 1.5708),
            Line::new(450.0, 1.5708),
        ]
    }

    #[test]
    fn empty_input_is_reported() {
        let resolver = FrameResolver::default();
        assert_eq!(resolver.resolve(&[], SIZE), Err(FrameError::EmptyInput));
    }

    #[test]
    fn too_many_groups_is_reported() {
        let lines: Vec<Line> = (0..11).map(|i| Line::new(i as f64 * 1000.0, 0.0)).collect();
        let resolver = FrameResolver::default();
        assert_eq!(
            resolver.resolve(&lines, SIZE),
            Err(FrameError::TooManyGroups { groups: 11, max: 10 })
        );
    }

    #[test]
    fn inset_is_applied_after_classification() {
        let resolver = FrameResolver::new(FrameParams {
            corner_inset_px: 10,
            ..small_frame_params()
        });
        let det = resolver.resolve(&square_lines(), SIZE).unwrap();
        assert_eq!(det.raw_quad.upper_left, Corner::new(50, 50));
        assert_eq!(det.quad.upper_left, Corner::new(60, 60));
        assert_eq!(det.quad.lower_right, Corner::new(440, 440));
    }

    #[test]
    fn offset_shrinks_the_frame() {
        // 10 % of 0.3 · 500 = 15 px.
        let resolver = FrameResolver::new(FrameParams {
            offset_percentage: 10.0,
            ..small_frame_params()
        });
        let det = resolver.resolve(&square_lines(), SIZE).unwrap();
        assert_eq!(det.quad.upper_left, Corner::new(65, 65));
        assert_eq!(det.quad.lower_right, Corner::new(435, 435));
    }

    #[test]
    fn detailed_report_keeps_partial_trace_on_failure() {
        let lines = vec![
            Line::new(100.0, 0.0),
            Line::new(100.3, 0.05),
            Line::new(400.0, 1.57),
            Line::new(402.0, 1.60),
        ];
        let report = FrameResolver::default().resolve_detailed(&lines, SIZE);
        assert!(!report.is_success());
        assert_eq!(report.trace.groups.len(), 2);
        assert_eq!(report.trace.intersections.len(), 1);
        assert_eq!(
            report.error.as_deref(),
            Some("expected 4 border intersections, found 1")
        );
    }

    #[test]
    fn default_proximity_merges_opposite_borders_of_small_frame() {
        let err = FrameResolver::default().resolve(&square_lines(), SIZE).unwrap_err();
        assert_eq!(err, FrameError::WrongIntersectionCount { found: 1 });
    }

    #[test]
    fn invalid_params_are_rejected() {
        let resolver = FrameResolver::new(FrameParams {
            offset_percentage: -1.0,
            ..Default::default()
        });
        assert!(matches!(
            resolver.resolve(&square_lines(), SIZE),
            Err(FrameError::InvalidParameter(_))
        ));
    }
}
