//! Ray-primitive intersection algorithms.
//!
//! Each primitive kind has its own closed-form test, added to [`Ray`] as
//! inherent methods. None of them allocate; "no hit" is an ordinary `None`
//! or `false`.
//!
//! [`Ray`]: crate::Ray

mod aabox;
mod plane;
mod triangle;

use std::ops::{Add, Mul};

use pickray_math::{Point3, Vec3};

/// What a triangle or polygon query reports on a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitMode {
    /// The world-space hit position.
    #[default]
    World,
    /// The ray parameter and barycentric weights of the hit.
    Planar,
}

/// Ray parameter and barycentric weights of a triangle hit.
///
/// For a triangle `(a, b, c)` the hit point is
/// `w0 * a + w1 * b + w2 * c` with `w0 = 1 - w1 - w2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Parameter along the ray.
    pub t: f64,
    /// Weight of the second vertex.
    pub w1: f64,
    /// Weight of the third vertex.
    pub w2: f64,
}

impl TriangleHit {
    /// Weight of the first vertex.
    #[inline]
    pub fn w0(&self) -> f64 {
        1.0 - self.w1 - self.w2
    }

    /// All three weights, first vertex first.
    pub fn barycentric(&self) -> Vec3 {
        Vec3::new(self.w0(), self.w1, self.w2)
    }

    /// Blend a per-vertex attribute (texture coordinate, color, normal...)
    /// at the hit.
    pub fn interpolate<T>(&self, a: T, b: T, c: T) -> T
    where
        T: Mul<f64, Output = T> + Add<Output = T>,
    {
        a * self.w0() + b * self.w1 + c * self.w2
    }

    /// `(t, w1, w2)` packed into a vector.
    pub fn packed(&self) -> Vec3 {
        Vec3::new(self.t, self.w1, self.w2)
    }
}

/// Result of a triangle or polygon query, shaped by its [`HitMode`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitLocation {
    /// World-space hit position.
    World(Point3),
    /// Ray parameter and barycentric weights.
    Planar(TriangleHit),
}

impl HitLocation {
    /// The hit as a single vector: the position for world hits, `(t, w1, w2)`
    /// for planar hits.
    pub fn packed(&self) -> Vec3 {
        match self {
            Self::World(p) => p.coords,
            Self::Planar(hit) => hit.packed(),
        }
    }

    /// The world position, if this is a world hit.
    pub fn world_point(&self) -> Option<Point3> {
        match self {
            Self::World(p) => Some(*p),
            Self::Planar(_) => None,
        }
    }
}
