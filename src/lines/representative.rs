//! Reduction of a border cluster to a single representative line.

use crate::angle::{circular_mean_half_pi, normalize_half_pi};
use crate::types::Line;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

/// How member angles are averaged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleAveraging {
    /// Arithmetic mean of distance and angle.
    ///
    /// Wrong for clusters straddling the `0/π` wrap (near-vertical borders
    /// reported once as ~0 and once as ~π), but such lines are never near
    /// under the raw-angle proximity test, so they do not share a cluster.
    #[default]
    Linear,
    /// Doubled-angle circular mean. Members more than π/2 away from the mean
    /// are re-expressed as `(-distance, angle ∓ π)` before their distances
    /// are averaged.
    Circular,
}

/// Averages the lines referenced by `group`.
///
/// Returns `None` for an empty group. A singleton group yields its line
/// unchanged.
pub fn representative_line(lines: &[Line], group: &[usize], averaging: AngleAveraging) -> Option<Line> {
    if group.is_empty() {
        return None;
    }
    if group.len() == 1 {
        return lines.get(group[0]).copied();
    }
    let members: Vec<Line> = group.iter().filter_map(|&i| lines.get(i).copied()).collect();
    if members.len() != group.len() {
        return None;
    }
    let n = members.len() as f64;
    match averaging {
        AngleAveraging::Linear => {
            let distance = members.iter().map(|l| l.distance).sum::<f64>() / n;
            let angle = members.iter().map(|l| l.angle).sum::<f64>() / n;
            Some(Line::new(distance, angle))
        }
        AngleAveraging::Circular => {
            let angles: Vec<f64> = members.iter().map(|l| l.angle).collect();
            let mean_angle = match circular_mean_half_pi(&angles) {
                Some(a) => a,
                None => angles.iter().sum::<f64>() / n,
            };
            let distance = members
                .iter()
                .map(|l| {
                    if (l.angle - mean_angle).abs() > FRAC_PI_2 {
                        -l.distance
                    } else {
                        l.distance
                    }
                })
                .sum::<f64>()
                / n;
            Some(Line::new(distance, normalize_half_pi(mean_angle)))
        }
    }
}

/// One representative line per group, in group order.
pub fn representative_lines(lines: &[Line], groups: &[Vec<usize>], averaging: AngleAveraging) -> Vec<Line> {
    groups
        .iter()
        .filter_map(|g| representative_line(lines, g, averaging))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::angular_difference;
    use std::f64::consts::PI;

    #[test]
    fn singleton_is_returned_unchanged() {
        let ls = [Line::new(123.4, 0.7), Line::new(-5.0, 2.9)];
        for mode in [AngleAveraging::Linear, AngleAveraging::Circular] {
            assert_eq!(representative_line(&ls, &[1], mode), Some(ls[1]));
        }
    }

    #[test]
    fn empty_or_out_of_range_group_is_none() {
        let ls = [Line::new(1.0, 0.0)];
        assert_eq!(representative_line(&ls, &[], AngleAveraging::Linear), None);
        assert_eq!(representative_line(&ls, &[0, 3], AngleAveraging::Linear), None);
    }

    #[test]
    fn linear_mean_of_members() {
        let ls = [Line::new(100.0, 0.0), Line::new(100.3, 0.05), Line::new(400.0, 1.57)];
        let rep = representative_line(&ls, &[0, 1], AngleAveraging::Linear).unwrap();
        assert!((rep.distance - 100.15).abs() < 1e-9);
        assert!((rep.angle - 0.025).abs() < 1e-12);
    }

    #[test]
    fn circular_mean_handles_wrap() {
        // The same vertical line at x=100 reported on both sides of the wrap.
        let ls = [Line::new(100.0, 0.01), Line::new(-100.0, PI - 0.01)];
        let linear = representative_line(&ls, &[0, 1], AngleAveraging::Linear).unwrap();
        assert!((linear.angle - FRAC_PI_2).abs() < 1e-9);

        let circ = representative_line(&ls, &[0, 1], AngleAveraging::Circular).unwrap();
        assert!(angular_difference(circ.angle, 0.0) < 1e-9, "angle={}", circ.angle);
        assert!((circ.distance.abs() - 100.0).abs() < 1e-9, "distance={}", circ.distance);
    }

    #[test]
    fn representative_lines_follow_group_order() {
        let ls = [Line::new(10.0, 0.0), Line::new(500.0, 1.5), Line::new(12.0, 0.0)];
        let reps = representative_lines(&ls, &[vec![0, 2], vec![1]], AngleAveraging::Linear);
        assert_eq!(reps, vec![Line::new(11.0, 0.0), Line::new(500.0, 1.5)]);
    }
}
