use crate::error::FrameError;
use crate::types::{Corner, CornerRole, Quadrilateral};
use log::debug;

/// Assigns the four intersections to corner roles around their centroid.
///
/// Image coordinates grow right and down, so the upper-left corner has both
/// coordinates below the centroid. Points exactly on a centroid axis have no
/// role, and two points competing for one role leave another unfilled; both
/// fail with [`FrameError::ClassificationFailed`] rather than guessing.
pub fn classify_corners(points: &[Corner]) -> Result<Quadrilateral, FrameError> {
    match points.len() {
        0 => return Err(FrameError::NoIntersections),
        4 => {}
        n => return Err(FrameError::WrongIntersectionCount { found: n }),
    }

    let n = points.len() as f64;
    let cx = points.iter().map(|p| p.x as f64).sum::<f64>() / n;
    let cy = points.iter().map(|p| p.y as f64).sum::<f64>() / n;

    let mut slots: [Option<Corner>; 4] = [None; 4];
    for &p in points {
        let (x, y) = (p.x as f64, p.y as f64);
        let role = if x < cx && y < cy {
            CornerRole::UpperLeft
        } else if x > cx && y < cy {
            CornerRole::UpperRight
        } else if x < cx && y > cy {
            CornerRole::LowerLeft
        } else if x > cx && y > cy {
            CornerRole::LowerRight
        } else {
            return Err(FrameError::ClassificationFailed {
                reason: format!(
                    "corner ({}, {}) lies on a centroid axis ({:.1}, {:.1})",
                    p.x, p.y, cx, cy
                ),
            });
        };
        let slot = &mut slots[role.index()];
        if let Some(prev) = slot {
            return Err(FrameError::ClassificationFailed {
                reason: format!(
                    "corners ({}, {}) and ({}, {}) both classified as {:?}",
                    prev.x, prev.y, p.x, p.y, role
                ),
            });
        }
        *slot = Some(p);
    }

    match slots {
        [Some(upper_left), Some(upper_right), Some(lower_left), Some(lower_right)] => {
            let quad = Quadrilateral {
                upper_left,
                upper_right,
                lower_left,
                lower_right,
            };
            debug!("classify: centroid=({:.1}, {:.1}) quad={:?}", cx, cy, quad);
            Ok(quad)
        }
        _ => Err(FrameError::ClassificationFailed {
            reason: "not every corner role was filled".to_string(),
        }),
    }
}
