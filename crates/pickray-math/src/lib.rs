#![warn(missing_docs)]

//! Math types for the pickray intersection kernel.
//!
//! Thin aliases over nalgebra plus the few scalar helpers the kernel leans
//! on: a sign-preserving reciprocal, the intersection epsilons, and an affine
//! transform for moving rays between frames.

use nalgebra::{Matrix4, Rotation3, Unit, Vector2, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A vector in 2D space, e.g. a texture coordinate.
pub type Vec2 = Vector2<f64>;

/// Threshold below which a ray counts as parallel to a triangle's plane.
///
/// Compared against `direction · (edge1 × edge2)`, so it scales with twice
/// the triangle's area.
pub const TRIANGLE_EPSILON: f64 = 1e-7;

/// Threshold for the plane test: both the parallel gate and the
/// behind-origin gate use it.
pub const PLANE_EPSILON: f64 = 1e-5;

/// Reciprocal that never traps on zero.
///
/// Nonzero input returns `1 / x`. Zero returns an infinity carrying the sign
/// of the zero, so `+0.0` maps to `+inf` and `-0.0` to `-inf`. Slab tests
/// rely on this: an axis the ray never moves along yields an unbounded
/// interval when the origin lies between the slabs and an empty one when it
/// does not.
#[inline]
pub fn safe_recip(x: f64) -> f64 {
    if x == 0.0 {
        if x.is_sign_negative() {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }
    } else {
        1.0 / x
    }
}

/// Component-wise [`safe_recip`].
#[inline]
pub fn safe_recip_vec(v: &Vec3) -> Vec3 {
    Vec3::new(safe_recip(v.x), safe_recip(v.y), safe_recip(v.z))
}

/// A 4x4 affine transformation.
///
/// Used to carry picking rays from world space into an entity's local frame
/// (and back).
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying homogeneous matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `offset`.
    pub fn translation(offset: Vec3) -> Self {
        Self {
            matrix: Matrix4::new_translation(&offset),
        }
    }

    /// Non-uniform scale along the three axes.
    pub fn scale(factors: Vec3) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&factors),
        }
    }

    /// Rotation by `angle` radians about `axis` through the origin.
    pub fn rotation(axis: &Dir3, angle: f64) -> Self {
        Self {
            matrix: Rotation3::from_axis_angle(axis, angle).to_homogeneous(),
        }
    }

    /// `self * other`: applying the result applies `other` first.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point (translation applies).
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        self.matrix.transform_point(p)
    }

    /// Transform a vector (translation ignored).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        self.matrix.transform_vector(v)
    }

    /// Inverse of this transform, if the matrix is invertible.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
