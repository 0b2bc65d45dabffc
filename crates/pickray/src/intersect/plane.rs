//! Ray-plane intersection (closed-form).

use pickray_math::{Point3, PLANE_EPSILON};

use crate::{Plane, Ray};

impl Ray {
    /// Ray parameter at which the ray crosses `plane`.
    ///
    /// Returns `None` when the ray is (nearly) parallel to the plane, or when
    /// the crossing lies behind or indistinguishably close to the origin.
    pub fn plane_parameter(&self, plane: &Plane) -> Option<f64> {
        let denominator = plane.normal.dot(&self.direction());
        if denominator.abs() < PLANE_EPSILON {
            return None;
        }

        let numerator = plane.constant - plane.normal.dot(&self.origin().coords);
        let ratio = numerator / denominator;
        if ratio < PLANE_EPSILON {
            return None;
        }
        Some(ratio)
    }

    /// World-space point where the ray crosses `plane`.
    pub fn intersects_plane(&self, plane: &Plane) -> Option<Point3> {
        self.plane_parameter(plane).map(|t| self.at(t))
    }

    /// Whether the ray crosses `plane` in front of its origin.
    pub fn hits_plane(&self, plane: &Plane) -> bool {
        self.plane_parameter(plane).is_some()
    }
}
