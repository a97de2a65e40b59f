use map_frame::Line;
use std::f64::consts::FRAC_PI_2;

/// Hough lines for an axis-aligned frame `[left, right] × [top, bottom]`.
///
/// Each border is reported `copies` times with a symmetric jitter of
/// `±jitter_px` in distance, so every border's average is the exact border.
/// Horizontal borders also get `±jitter_rad` in angle; vertical ones keep
/// angle 0 because a tilt below zero wraps to a negative distance near π.
pub fn frame_lines(
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    copies: usize,
    jitter_px: f64,
    jitter_rad: f64,
) -> Vec<Line> {
    assert!(copies > 0, "at least one copy per border");
    let offsets: Vec<f64> = if copies == 1 {
        vec![0.0]
    } else {
        (0..copies)
            .map(|i| -1.0 + 2.0 * i as f64 / (copies - 1) as f64)
            .collect()
    };

    let mut lines = Vec::with_capacity(4 * copies);
    let borders = [
        (left, 0.0, 0.0),
        (right, 0.0, 0.0),
        (top, FRAC_PI_2, jitter_rad),
        (bottom, FRAC_PI_2, jitter_rad),
    ];
    for (distance, angle, tilt) in borders {
        for &k in &offsets {
            lines.push(Line::new(distance + k * jitter_px, angle + k * tilt));
        }
    }
    lines
}

/// Interleaves the lines so clusters are not contiguous in the input.
pub fn interleave(lines: &[Line]) -> Vec<Line> {
    let (even, odd): (Vec<_>, Vec<_>) = lines.iter().enumerate().partition(|(i, _)| i % 2 == 0);
    odd.into_iter().chain(even).map(|(_, l)| *l).collect()
}
