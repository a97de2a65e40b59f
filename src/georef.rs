//! Pixel → geographic mapping from four frame corners.
//!
//! The fitted transform goes from pixel `(x, y)` to `(longitude, latitude)`,
//! i.e. x/east first, the axis order georeferencing exports expect. Query
//! results are handed back as [`GeoCoord`] / `(latitude, longitude)`, the
//! order the corner coordinates are supplied in.

use crate::error::FrameError;
use crate::homography::{fit_homography_4pt, project};
use crate::types::{Corner, GeoCoord, GroundControlPoint, Quadrilateral};
use log::debug;
use nalgebra::Matrix3;

#[derive(Clone, Debug)]
pub struct Georeferencer {
    pixels: [Corner; 4],
    coords: [GeoCoord; 4],
    hmtx: Matrix3<f64>,
}

impl Georeferencer {
    /// Fits the frame corners to their coordinates, both in upper-left,
    /// upper-right, lower-left, lower-right order.
    pub fn fit(quad: &Quadrilateral, coords: &[GeoCoord]) -> Result<Self, FrameError> {
        Self::fit_points(&quad.to_array(), coords)
    }

    /// Same as [`fit`](Self::fit) on raw slices; both must hold exactly four
    /// entries.
    pub fn fit_points(pixels: &[Corner], coords: &[GeoCoord]) -> Result<Self, FrameError> {
        let pixels: [Corner; 4] = pixels
            .try_into()
            .map_err(|_| FrameError::WrongCorrespondenceCount {
                found: pixels.len(),
            })?;
        let coords: [GeoCoord; 4] = coords
            .try_into()
            .map_err(|_| FrameError::WrongCorrespondenceCount {
                found: coords.len(),
            })?;

        let src = pixels.map(Corner::to_f64);
        let dst = coords.map(|c| c.lon_lat());
        let hmtx = fit_homography_4pt(&src, &dst)?;
        debug!("georef: fitted homography {:?}", hmtx);
        Ok(Self {
            pixels,
            coords,
            hmtx,
        })
    }

    /// Pixel → `[longitude, latitude]` homography.
    pub fn homography(&self) -> &Matrix3<f64> {
        &self.hmtx
    }

    /// Ground control points `gcp1..gcp4` pairing each corner with its
    /// `[longitude, latitude]`.
    pub fn gcps(&self) -> Vec<GroundControlPoint> {
        generate_gcps(&self.pixels, &self.coords)
    }

    /// Geographic coordinate of pixel `(x, y)`; `None` if it maps to
    /// infinity.
    pub fn transform(&self, x: f64, y: f64) -> Option<GeoCoord> {
        let [lon, lat] = project(&self.hmtx, [x, y])?;
        Some(GeoCoord::new(lat, lon))
    }

    /// `(latitude, longitude)` of pixel `(x, y)`.
    pub fn transform_lat_lon(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        self.transform(x, y).map(|g| (g.latitude, g.longitude))
    }
}

/// GCP records for paired corners and coordinates. World positions are
/// stored longitude first.
pub fn generate_gcps(pixels: &[Corner; 4], coords: &[GeoCoord; 4]) -> Vec<GroundControlPoint> {
    pixels
        .iter()
        .zip(coords.iter())
        .enumerate()
        .map(|(i, (p, c))| GroundControlPoint {
            id: format!("gcp{}", i + 1),
            pixel: [p.x, p.y],
            world: c.lon_lat(),
        })
        .collect()
}
