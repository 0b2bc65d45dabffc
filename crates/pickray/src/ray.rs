//! Ray representation, construction, and point-to-ray distance.

use pickray_math::{safe_recip, safe_recip_vec, Point3, Transform, Vec3};

/// Extent given to rays built without an explicit length (2^53 - 1).
pub const DEFAULT_LENGTH: f64 = 9_007_199_254_740_991.0;

/// A half-line `origin + t * direction`, `t >= 0`, with a cached inverse
/// direction for slab tests.
///
/// `direction` is only guaranteed to be unit length after a from/to
/// construction or [`Ray::normalize_direction`]; [`Ray::set_direction`]
/// stores its argument verbatim. Either way the inverse direction is
/// rederived on every assignment, so it can never go stale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: Vec3,
    /// Component-wise `safe_recip(direction)`.
    inv_direction: Vec3,
    length: f64,
}

impl Ray {
    /// Create a ray from origin, direction and extent.
    ///
    /// The direction is taken as given (no normalization).
    pub fn new(origin: Point3, direction: Vec3, length: f64) -> Self {
        let mut ray = Self::default();
        ray.construct_origin_direction(origin, direction, length);
        ray
    }

    /// Create a ray with the default, effectively infinite extent.
    pub fn with_direction(origin: Point3, direction: Vec3) -> Self {
        Self::new(origin, direction, DEFAULT_LENGTH)
    }

    /// Create a ray starting at `from` and aimed at `to`.
    ///
    /// The direction is normalized and [`Ray::length`] is the distance
    /// between the two points.
    pub fn from_to(from: Point3, to: Point3) -> Self {
        let mut ray = Self::default();
        ray.construct_from_to(from, to);
        ray
    }

    /// Reset origin, direction and extent in place.
    pub fn construct_origin_direction(
        &mut self,
        origin: Point3,
        direction: Vec3,
        length: f64,
    ) -> &mut Self {
        self.origin = origin;
        self.set_direction(direction);
        self.length = length;
        self
    }

    /// Reset this ray to run from `from` toward `to`.
    ///
    /// Overwrites [`Ray::length`] with `|to - from|`.
    pub fn construct_from_to(&mut self, from: Point3, to: Point3) -> &mut Self {
        self.origin = from;
        self.direction = to - from;
        self.normalize_direction();
        self
    }

    /// Store `direction` verbatim and rederive the inverse direction.
    pub fn set_direction(&mut self, direction: Vec3) -> &mut Self {
        self.direction = direction;
        self.inv_direction = safe_recip_vec(&direction);
        self
    }

    /// Scale the direction to unit length and return it.
    ///
    /// Side effect: [`Ray::length`] becomes the pre-normalization magnitude,
    /// replacing whatever extent it held. A zero direction stays zero and the
    /// length becomes `0`.
    pub fn normalize_direction(&mut self) -> Vec3 {
        self.length = self.direction.norm();
        let inv_length = safe_recip(self.length);
        let unit = if inv_length.is_finite() {
            self.direction * inv_length
        } else {
            Vec3::zeros()
        };
        self.set_direction(unit);
        self.direction
    }

    /// Replace the origin.
    pub fn set_origin(&mut self, origin: Point3) -> &mut Self {
        self.origin = origin;
        self
    }

    /// Replace the extent.
    pub fn set_length(&mut self, length: f64) -> &mut Self {
        self.length = length;
        self
    }

    /// Origin of the ray.
    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Direction of the ray, unit length unless set raw.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Cached component-wise reciprocal of the direction.
    #[inline]
    pub fn inverse_direction(&self) -> Vec3 {
        self.inv_direction
    }

    /// The ray's length scalar.
    ///
    /// What this means depends on how the ray was last built: the distance
    /// between the endpoints after a from/to construction or
    /// [`Ray::normalize_direction`], the caller's extent (default
    /// [`DEFAULT_LENGTH`]) after an origin/direction construction.
    #[inline]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Point at the far end of the ray's extent.
    pub fn end(&self) -> Point3 {
        self.at(self.length)
    }

    /// Map this ray through an affine transform.
    ///
    /// The direction is transformed as a vector and not renormalized, so a
    /// parameter `t` names the same physical point before and after. The
    /// length is carried over unchanged.
    pub fn transformed(&self, transform: &Transform) -> Self {
        Self::new(
            transform.apply_point(&self.origin),
            transform.apply_vec(&self.direction),
            self.length,
        )
    }

    /// Closest point on the ray (as a half-line) to `point`.
    pub fn closest_point(&self, point: &Point3) -> Point3 {
        let t0 = self.direction.dot(&(point - self.origin));
        if t0 > 0.0 {
            self.at(t0)
        } else {
            self.origin
        }
    }

    /// Squared distance from `point` to the ray, with the closest point.
    pub fn distance_squared_with_closest(&self, point: &Point3) -> (f64, Point3) {
        let closest = self.closest_point(point);
        ((closest - point).norm_squared(), closest)
    }

    /// Squared distance from `point` to the ray.
    pub fn distance_squared(&self, point: &Point3) -> f64 {
        self.distance_squared_with_closest(point).0
    }
}

impl Default for Ray {
    /// Ray at the origin looking down `+Z` with the default extent.
    fn default() -> Self {
        let direction = Vec3::z();
        Self {
            origin: Point3::origin(),
            direction,
            inv_direction: safe_recip_vec(&direction),
            length: DEFAULT_LENGTH,
        }
    }
}
