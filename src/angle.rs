//! Angle utilities shared by the clustering and offset stages.
//!
//! Polar line angles live in `[0, π)`. The proximity test used for
//! clustering deliberately compares raw angles (no wrap), so the helpers here
//! are only used where wrap-around is meaningful.

use std::f64::consts::{FRAC_PI_2, PI};

/// Normalizes an angle into the range [0, π).
#[inline]
pub fn normalize_half_pi(angle: f64) -> f64 {
    let norm = angle.rem_euclid(PI);
    if norm >= PI - 1e-12 {
        0.0
    } else {
        norm
    }
}

/// Computes the smallest unsigned angular difference between two line angles,
/// treating antipodal directions as equivalent (i.e. π apart → 0).
#[inline]
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let mut diff = (a - b).abs();
    if diff > PI {
        diff = diff.rem_euclid(PI);
    }
    if diff > FRAC_PI_2 {
        PI - diff
    } else {
        diff
    }
}

/// Circular mean of line angles with period π.
///
/// Uses the doubled-angle trick so that 0.01 and π - 0.01 average to ~0
/// instead of ~π/2. Returns `None` for an empty input or when the angles
/// cancel out exactly.
pub fn circular_mean_half_pi(angles: &[f64]) -> Option<f64> {
    if angles.is_empty() {
        return None;
    }
    let (mut s, mut c) = (0.0f64, 0.0f64);
    for &a in angles {
        s += (2.0 * a).sin();
        c += (2.0 * a).cos();
    }
    if s.hypot(c) <= 1e-12 {
        return None;
    }
    Some(normalize_half_pi(0.5 * s.atan2(c)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn normalize_half_pi_basic() {
        assert!(approx_eq(normalize_half_pi(0.5), 0.5));
        assert!(approx_eq(
            normalize_half_pi(-std::f64::consts::FRAC_PI_4),
            3.0 * std::f64::consts::FRAC_PI_4
        ));
        assert!(approx_eq(normalize_half_pi(PI), 0.0));
        assert!(approx_eq(normalize_half_pi(3.0 * PI), 0.0));
    }

    #[test]
    fn angular_difference_handles_wrap() {
        assert!(approx_eq(angular_difference(0.0, PI), 0.0));
        assert!(approx_eq(angular_difference(0.0, FRAC_PI_2), FRAC_PI_2));
        assert!(approx_eq(
            angular_difference(0.25, 1.7),
            angular_difference(1.7, 0.25)
        ));
    }

    #[test]
    fn circular_mean_straddles_wrap() {
        let mean = circular_mean_half_pi(&[0.02, PI - 0.02]).unwrap();
        assert!(angular_difference(mean, 0.0) < 1e-9, "mean={mean}");
    }

    #[test]
    fn circular_mean_matches_linear_away_from_wrap() {
        let mean = circular_mean_half_pi(&[1.0, 1.1, 1.2]).unwrap();
        assert!((mean - 1.1).abs() < 1e-3, "mean={mean}");
        assert!(circular_mean_half_pi(&[]).is_none());
    }
}
