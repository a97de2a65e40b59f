//! Inward offsetting of border lines.
//!
//! The detected borders usually sit on the thick outer frame of a sheet.
//! Shifting each border toward the image centre by a fraction of the image
//! size moves the resolved corners onto the inner frame.

use crate::types::{ImageSize, Line, Orientation};

/// Share of the smaller image side reached at 100 %.
const MAX_OFFSET_FRACTION: f64 = 0.3;

/// Offset in pixels for `percentage` ∈ [0, 100].
pub fn offset_magnitude(percentage: f64, size: ImageSize) -> f64 {
    size.min_side() * MAX_OFFSET_FRACTION * (percentage / 100.0)
}

/// Shifts `line` toward the image interior.
///
/// The side is decided on the dominant axis: for a vertical line the x of its
/// foot point is compared with the image centre column, for a horizontal line
/// the y with the centre row. A line beyond the centre has its distance
/// reduced, otherwise increased. A zero percentage returns the line as is.
pub fn offset_line(line: Line, percentage: f64, size: ImageSize) -> Line {
    if percentage == 0.0 {
        return line;
    }
    let amount = offset_magnitude(percentage, size);
    let [cx, cy] = size.center();
    let beyond_center = match line.orientation() {
        Orientation::Vertical => line.distance * line.angle.cos() > cx,
        Orientation::Horizontal => line.distance * line.angle.sin() > cy,
    };
    let distance = if beyond_center {
        line.distance - amount
    } else {
        line.distance + amount
    };
    Line::new(distance, line.angle)
}

pub fn offset_lines(lines: &[Line], percentage: f64, size: ImageSize) -> Vec<Line> {
    lines
        .iter()
        .map(|&l| offset_line(l, percentage, size))
        .collect()
}
