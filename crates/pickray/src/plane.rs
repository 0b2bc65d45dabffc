//! Infinite planes in constant-offset form.

use pickray_math::{Point3, Vec3};

/// The set of points `p` with `normal · p = constant`.
///
/// The normal need not be unit length; intersection only needs the
/// equation to hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Plane normal.
    pub normal: Vec3,
    /// Signed offset along the normal (scaled by its length).
    pub constant: f64,
}

impl Plane {
    /// Create a plane from its normal and offset constant.
    pub fn new(normal: Vec3, constant: f64) -> Self {
        Self { normal, constant }
    }

    /// The plane through `point` with the given normal.
    pub fn from_point_normal(point: &Point3, normal: Vec3) -> Self {
        Self {
            normal,
            constant: normal.dot(&point.coords),
        }
    }

    /// The plane through three points, normal `(b - a) × (c - a)` normalized.
    ///
    /// Returns `None` for collinear or coincident points.
    pub fn from_points(a: &Point3, b: &Point3, c: &Point3) -> Option<Self> {
        let normal = (b - a).cross(&(c - a)).try_normalize(f64::EPSILON)?;
        Some(Self::from_point_normal(a, normal))
    }

    /// The XY plane (`z = 0`), normal `+Z`.
    pub fn xy() -> Self {
        Self::new(Vec3::z(), 0.0)
    }

    /// Signed distance from `point` to the plane, positive on the normal side.
    pub fn distance_to(&self, point: &Point3) -> f64 {
        (self.normal.dot(&point.coords) - self.constant) / self.normal.norm()
    }
}
