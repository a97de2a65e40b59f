use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_4, PI};

/// Straight line in polar normal form: `x·cos(angle) + y·sin(angle) = distance`.
///
/// This is the shape produced by a Hough transform: `distance` is the signed
/// perpendicular distance from the image origin (pixels) and `angle` lies in
/// `[0, π)`. Serialized as `[distance, angle]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Line {
    pub distance: f64,
    pub angle: f64,
}

impl Line {
    pub const fn new(distance: f64, angle: f64) -> Self {
        Self { distance, angle }
    }

    /// Dominant axis of the line. Near-vertical lines have normals close to
    /// the x axis.
    pub fn orientation(&self) -> Orientation {
        if self.angle < FRAC_PI_4 || self.angle > 3.0 * FRAC_PI_4 {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        }
    }

    /// Foot of the perpendicular from the origin onto the line.
    pub fn foot(&self) -> [f64; 2] {
        [
            self.distance * self.angle.cos(),
            self.distance * self.angle.sin(),
        ]
    }

    /// Two points `extension` pixels either side of the foot point, suitable
    /// for drawing the line across a whole image.
    pub fn endpoints(&self, extension: f64) -> [[i32; 2]; 2] {
        let (a, b) = (self.angle.cos(), self.angle.sin());
        let [x0, y0] = self.foot();
        [
            [(x0 - extension * b) as i32, (y0 + extension * a) as i32],
            [(x0 + extension * b) as i32, (y0 - extension * a) as i32],
        ]
    }

    pub fn is_finite(&self) -> bool {
        self.distance.is_finite() && self.angle.is_finite()
    }

    /// Whether the angle lies in the canonical Hough range `[0, π)`.
    pub fn has_canonical_angle(&self) -> bool {
        (0.0..PI).contains(&self.angle)
    }
}

impl From<[f64; 2]> for Line {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<Line> for [f64; 2] {
    fn from(l: Line) -> Self {
        [l.distance, l.angle]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// Image dimensions in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> [f64; 2] {
        [self.width as f64 / 2.0, self.height as f64 / 2.0]
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height) as f64
    }
}

/// Integer pixel coordinate. Serialized as `[x, y]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct Corner {
    pub x: i32,
    pub y: i32,
}

impl Corner {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn to_f64(self) -> [f64; 2] {
        [self.x as f64, self.y as f64]
    }
}

impl From<[i32; 2]> for Corner {
    fn from(v: [i32; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<Corner> for [i32; 2] {
    fn from(c: Corner) -> Self {
        [c.x, c.y]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerRole {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl CornerRole {
    /// Canonical output order.
    pub const ALL: [CornerRole; 4] = [
        CornerRole::UpperLeft,
        CornerRole::UpperRight,
        CornerRole::LowerLeft,
        CornerRole::LowerRight,
    ];

    pub fn index(self) -> usize {
        match self {
            CornerRole::UpperLeft => 0,
            CornerRole::UpperRight => 1,
            CornerRole::LowerLeft => 2,
            CornerRole::LowerRight => 3,
        }
    }
}

/// Four role-labelled frame corners.
///
/// Serialized as `[[x,y],[x,y],[x,y],[x,y]]` in upper-left, upper-right,
/// lower-left, lower-right order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[Corner; 4]", into = "[Corner; 4]")]
pub struct Quadrilateral {
    pub upper_left: Corner,
    pub upper_right: Corner,
    pub lower_left: Corner,
    pub lower_right: Corner,
}

impl Quadrilateral {
    /// Full image rectangle, used when no frame could be resolved.
    pub fn from_image_bounds(size: ImageSize) -> Self {
        let (w, h) = (size.width as i32, size.height as i32);
        Self {
            upper_left: Corner::new(0, 0),
            upper_right: Corner::new(w, 0),
            lower_left: Corner::new(0, h),
            lower_right: Corner::new(w, h),
        }
    }

    pub fn corner(&self, role: CornerRole) -> Corner {
        match role {
            CornerRole::UpperLeft => self.upper_left,
            CornerRole::UpperRight => self.upper_right,
            CornerRole::LowerLeft => self.lower_left,
            CornerRole::LowerRight => self.lower_right,
        }
    }

    pub fn to_array(&self) -> [Corner; 4] {
        [
            self.upper_left,
            self.upper_right,
            self.lower_left,
            self.lower_right,
        ]
    }

    /// Moves every corner `margin` pixels along both axes toward the frame
    /// interior. Scanned sheets carry a thick outer border around the thin
    /// inner frame; the inset bridges that gap.
    pub fn inset(&self, margin: i32) -> Self {
        Self {
            upper_left: Corner::new(self.upper_left.x + margin, self.upper_left.y + margin),
            upper_right: Corner::new(self.upper_right.x - margin, self.upper_right.y + margin),
            lower_left: Corner::new(self.lower_left.x + margin, self.lower_left.y - margin),
            lower_right: Corner::new(self.lower_right.x - margin, self.lower_right.y - margin),
        }
    }
}

impl From<[Corner; 4]> for Quadrilateral {
    fn from(c: [Corner; 4]) -> Self {
        Self {
            upper_left: c[0],
            upper_right: c[1],
            lower_left: c[2],
            lower_right: c[3],
        }
    }
}

impl From<Quadrilateral> for [Corner; 4] {
    fn from(q: Quadrilateral) -> Self {
        q.to_array()
    }
}

/// Geographic coordinate in degrees. Serialized as `[latitude, longitude]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeoCoord {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoord {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// `[longitude, latitude]`, the axis order used by GCP exports.
    pub fn lon_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

impl From<[f64; 2]> for GeoCoord {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

impl From<GeoCoord> for [f64; 2] {
    fn from(g: GeoCoord) -> Self {
        [g.latitude, g.longitude]
    }
}

/// Pixel-to-geographic correspondence handed to georeferencing exports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroundControlPoint {
    pub id: String,
    pub pixel: [i32; 2],
    /// `[longitude, latitude]`.
    pub world: [f64; 2],
}
