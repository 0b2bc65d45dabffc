//! Ray-AABB intersection using the slab method.

use pickray_math::{Point3, Vec3};

use crate::{Aabb3, Ray};

impl Ray {
    /// Entry parameter of the ray into the box `[bound_min, bound_max]`.
    ///
    /// `inverse_direction` is passed in rather than read from the ray so one
    /// ray can be run against many boxes with a caller-adjusted inverse.
    ///
    /// Returns `None` when the box lies entirely behind the origin or the
    /// three slabs do not overlap. A negative entry parameter means the
    /// origin is inside the box; it is still a hit.
    pub fn intersects_aabox(
        &self,
        bound_min: &Point3,
        bound_max: &Point3,
        inverse_direction: &Vec3,
    ) -> Option<f64> {
        let origin = self.origin();
        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;
        for axis in 0..3 {
            let t0 = (bound_min[axis] - origin[axis]) * inverse_direction[axis];
            let t1 = (bound_max[axis] - origin[axis]) * inverse_direction[axis];
            t_min = t_min.max(t0.min(t1));
            t_max = t_max.min(t0.max(t1));
        }

        // Whole box behind the origin.
        if t_max < 0.0 {
            return None;
        }
        // Slabs do not overlap.
        if t_min > t_max {
            return None;
        }
        Some(t_min)
    }

    /// Entry parameter into `aabb` using the ray's cached inverse direction.
    pub fn intersect_aabb(&self, aabb: &Aabb3) -> Option<f64> {
        self.intersects_aabox(&aabb.min, &aabb.max, &self.inverse_direction())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_box() -> Aabb3 {
        Aabb3::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_ray_aabb_axis_aligned_hit() {
        let ray = Ray::with_direction(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(ray.intersect_aabb(&unit_box()).unwrap(), 4.0);
    }

    #[test]
    fn test_ray_aabb_origin_inside() {
        let ray = Ray::with_direction(Point3::origin(), Vec3::new(0.0, 0.0, -1.0));
        let t = ray.intersect_aabb(&unit_box()).expect("inside counts as a hit");
        assert!(t <= 0.0);
        assert_relative_eq!(t, -1.0);
    }

    #[test]
    fn test_ray_aabb_miss_beside() {
        let ray = Ray::with_direction(Point3::new(-5.0, 5.0, 5.0), Vec3::x());
        assert!(ray.intersect_aabb(&unit_box()).is_none());
    }

    #[test]
    fn test_ray_aabb_zero_component_outside_slab() {
        // Moving only along z, but x is outside the box's x slab.
        let ray = Ray::with_direction(Point3::new(2.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(ray.intersect_aabb(&unit_box()).is_none());
        let ray = Ray::with_direction(Point3::new(-2.0, 0.0, 5.0), Vec3::new(-0.0, 0.0, -1.0));
        assert!(ray.intersect_aabb(&unit_box()).is_none());
    }

    #[test]
    fn test_ray_aabb_negative_zero_component_hits() {
        let ray = Ray::with_direction(Point3::new(0.5, 0.0, 5.0), Vec3::new(-0.0, -0.0, -1.0));
        assert_relative_eq!(ray.intersect_aabb(&unit_box()).unwrap(), 4.0);
    }

    #[test]
    fn test_ray_aabb_behind() {
        let ray = Ray::with_direction(Point3::new(0.0, 0.0, 5.0), Vec3::z());
        assert!(ray.intersect_aabb(&unit_box()).is_none());
    }

    #[test]
    fn test_ray_aabb_diagonal() {
        let ray = Ray::from_to(Point3::new(-3.0, -3.0, -3.0), Point3::origin());
        let t = ray.intersect_aabb(&unit_box()).unwrap();
        assert_relative_eq!(t, 2.0 * 3.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_explicit_inverse_direction() {
        let ray = Ray::with_direction(Point3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        // A scaled inverse scales the reported parameter.
        let inv = ray.inverse_direction() * 2.0;
        let t = ray
            .intersects_aabox(&Point3::new(-1.0, -1.0, -1.0), &Point3::new(1.0, 1.0, 1.0), &inv)
            .unwrap();
        assert_relative_eq!(t, 8.0);
    }
}
