use crate::types::{Corner, Line};
use std::f64::consts::PI;

pub const DEFAULT_PARALLEL_EPSILON: f64 = 1e-10;

/// Intersection of two polar lines, truncated to integer pixels.
///
/// Solves `cos θ·x + sin θ·y = ρ` for both lines with Cramer's rule. Returns
/// `None` when the lines are parallel (equal angles, angles π apart, or a
/// vanishing determinant, all within `epsilon`) or the solution is not finite.
pub fn intersect(a: &Line, b: &Line, epsilon: f64) -> Option<Corner> {
    let dtheta = (a.angle - b.angle).abs();
    if dtheta < epsilon || (dtheta - PI).abs() < epsilon {
        return None;
    }
    let (c1, s1) = (a.angle.cos(), a.angle.sin());
    let (c2, s2) = (b.angle.cos(), b.angle.sin());
    let det = c1 * s2 - c2 * s1;
    if det.abs() < epsilon {
        return None;
    }
    let x = (a.distance * s2 - b.distance * s1) / det;
    let y = (c1 * b.distance - c2 * a.distance) / det;
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(Corner::new(truncate_pixel(x), truncate_pixel(y)))
}

/// Truncates toward zero, snapping values within rounding noise of an
/// integer (e.g. `49.99999999999999`) to that integer first.
fn truncate_pixel(v: f64) -> i32 {
    let r = v.round();
    if (v - r).abs() < 1e-6 {
        r as i32
    } else {
        v.trunc() as i32
    }
}

/// Intersections of all unordered pairs `i < j`, in pair order.
pub fn solve_intersections(lines: &[Line], epsilon: f64) -> Vec<Corner> {
    let mut out = Vec::new();
    for i in 0..lines.len() {
        for j in (i + 1)..lines.len() {
            if let Some(c) = intersect(&lines[i], &lines[j], epsilon) {
                out.push(c);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = DEFAULT_PARALLEL_EPSILON;

    #[test]
    fn perpendicular_lines_meet() {
        let v = Line::new(50.0, 0.0);
        let h = Line::new(450.0, 1.5708);
        assert_eq!(intersect(&v, &h, EPS), Some(Corner::new(50, 450)));
        assert_eq!(intersect(&h, &v, EPS), Some(Corner::new(50, 450)));
    }

    #[test]
    fn identical_and_antipodal_angles_are_parallel() {
        let a = Line::new(10.0, 0.4);
        assert_eq!(intersect(&a, &Line::new(200.0, 0.4), EPS), None);
        assert_eq!(intersect(&Line::new(10.0, 0.0), &Line::new(-50.0, PI), EPS), None);
    }

    #[test]
    fn oblique_lines_meet() {
        // x + y = 200 (θ = π/4) meets x = 30.5 at (30.5, 169.5).
        let diag = Line::new(100.0 * std::f64::consts::SQRT_2, std::f64::consts::FRAC_PI_4);
        let v = Line::new(30.5, 0.0);
        assert_eq!(intersect(&diag, &v, EPS), Some(Corner::new(30, 169)));
    }

    #[test]
    fn truncation_is_toward_zero() {
        assert_eq!(truncate_pixel(12.9), 12);
        assert_eq!(truncate_pixel(-12.9), -12);
        assert_eq!(truncate_pixel(49.999999999999), 50);
    }

    #[test]
    fn four_borders_give_four_corners() {
        let lines = [
            Line::new(50.0, 0.0),
            Line::new(450.0, 0.0),
            Line::new(50.0, 1.5708),
            Line::new(450.0, 1.5708),
        ];
        let corners = solve_intersections(&lines, EPS);
        assert_eq!(
            corners,
            vec![
                Corner::new(50, 50),
                Corner::new(50, 450),
                Corner::new(450, 50),
                Corner::new(450, 450),
            ]
        );
    }
}
