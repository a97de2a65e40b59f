//! Exact four-point projective transforms.
//!
//! `fit_homography_4pt` solves the 8×8 DLT system for `H` with `H[2][2] = 1`
//! after translating and scaling both point sets to a unit-sized frame around
//! the origin. Pixel corners (hundreds to thousands) and geographic degrees
//! (a tenth of a degree across a sheet) differ by orders of magnitude; the
//! normalization keeps the system well conditioned.

use crate::error::FrameError;
use nalgebra::{Matrix3, SMatrix, SVector, Vector3};

const EPS: f64 = 1e-12;

/// Maps a point through `h` with perspective division. `None` when the
/// point lands at infinity.
pub fn project(h: &Matrix3<f64>, p: [f64; 2]) -> Option<[f64; 2]> {
    let v = h * Vector3::new(p[0], p[1], 1.0);
    let w = v[2];
    if !w.is_finite() || w.abs() <= EPS || !v[0].is_finite() || !v[1].is_finite() {
        return None;
    }
    Some([v[0] / w, v[1] / w])
}

pub fn apply_homography_points(h: &Matrix3<f64>, pts: &[[f64; 2]]) -> Option<Vec<[f64; 2]>> {
    pts.iter().map(|&p| project(h, p)).collect()
}

/// Twice the signed area of the triangle `abc`.
fn cross(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// Checks that no three of the four points are collinear (which also
/// rules out duplicates). The tolerance scales with the point spread.
fn ensure_general_position(pts: &[[f64; 2]; 4], label: &str) -> Result<(), FrameError> {
    let mut spread = 0.0f64;
    for i in 0..4 {
        for j in (i + 1)..4 {
            spread = spread.max((pts[i][0] - pts[j][0]).hypot(pts[i][1] - pts[j][1]));
        }
    }
    if spread <= EPS {
        return Err(FrameError::DegenerateTransform {
            reason: format!("{label} points coincide"),
        });
    }
    let tol = 1e-9 * spread * spread;
    const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];
    for [a, b, c] in TRIPLES {
        if cross(pts[a], pts[b], pts[c]).abs() <= tol {
            return Err(FrameError::DegenerateTransform {
                reason: format!("{label} points {a}, {b}, {c} are collinear"),
            });
        }
    }
    Ok(())
}

/// Similarity transform moving the centroid to the origin and the mean
/// distance to √2.
fn normalizing_transform(pts: &[[f64; 2]; 4]) -> Matrix3<f64> {
    let cx = pts.iter().map(|p| p[0]).sum::<f64>() / 4.0;
    let cy = pts.iter().map(|p| p[1]).sum::<f64>() / 4.0;
    let mean_dist = pts
        .iter()
        .map(|p| (p[0] - cx).hypot(p[1] - cy))
        .sum::<f64>()
        / 4.0;
    let s = if mean_dist > EPS {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };
    Matrix3::new(s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0)
}

fn transform_all(t: &Matrix3<f64>, pts: &[[f64; 2]; 4]) -> [[f64; 2]; 4] {
    pts.map(|p| [t[(0, 0)] * p[0] + t[(0, 2)], t[(1, 1)] * p[1] + t[(1, 2)]])
}

/// Fits `H` such that `project(H, src[i]) == dst[i]` for all four pairs.
///
/// Fails with [`FrameError::DegenerateTransform`] when three source points
/// are collinear or the resulting matrix is singular (e.g. collinear
/// destinations).
pub fn fit_homography_4pt(
    src: &[[f64; 2]; 4],
    dst: &[[f64; 2]; 4],
) -> Result<Matrix3<f64>, FrameError> {
    if src.iter().chain(dst.iter()).any(|p| !p[0].is_finite() || !p[1].is_finite()) {
        return Err(FrameError::DegenerateTransform {
            reason: "non-finite coordinate".to_string(),
        });
    }
    ensure_general_position(src, "pixel")?;

    let t_src = normalizing_transform(src);
    let t_dst = normalizing_transform(dst);
    let src_n = transform_all(&t_src, src);
    let dst_n = transform_all(&t_dst, dst);

    // Unknowns h0..h7 with h8 = 1:
    //   u = (h0 x + h1 y + h2) / (h6 x + h7 y + 1)
    //   v = (h3 x + h4 y + h5) / (h6 x + h7 y + 1)
    let mut a = SMatrix::<f64, 8, 8>::zeros();
    let mut b = SVector::<f64, 8>::zeros();
    for i in 0..4 {
        let [x, y] = src_n[i];
        let [u, v] = dst_n[i];
        let r = 2 * i;
        a[(r, 0)] = x;
        a[(r, 1)] = y;
        a[(r, 2)] = 1.0;
        a[(r, 6)] = -u * x;
        a[(r, 7)] = -u * y;
        b[r] = u;

        a[(r + 1, 3)] = x;
        a[(r + 1, 4)] = y;
        a[(r + 1, 5)] = 1.0;
        a[(r + 1, 6)] = -v * x;
        a[(r + 1, 7)] = -v * y;
        b[r + 1] = v;
    }

    let h = a.lu().solve(&b).ok_or_else(|| FrameError::DegenerateTransform {
        reason: "correspondence system is singular".to_string(),
    })?;
    let h_norm = Matrix3::new(h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0);
    if h_norm.iter().any(|v| !v.is_finite()) {
        return Err(FrameError::DegenerateTransform {
            reason: "non-finite solution".to_string(),
        });
    }
    // Normalized frames have unit scale, so an absolute threshold is fine.
    if h_norm.determinant().abs() <= 1e-9 {
        return Err(FrameError::DegenerateTransform {
            reason: "transform matrix is singular".to_string(),
        });
    }

    let t_dst_inv = t_dst
        .try_inverse()
        .ok_or_else(|| FrameError::DegenerateTransform {
            reason: "destination points coincide".to_string(),
        })?;
    let mut hmtx = t_dst_inv * h_norm * t_src;
    let scale = hmtx[(2, 2)];
    if scale.abs() > EPS {
        hmtx /= scale;
    }
    Ok(hmtx)
}
