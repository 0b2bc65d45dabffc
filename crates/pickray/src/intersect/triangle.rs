//! Ray-triangle and ray-quad intersection (sign-robust Möller–Trumbore).

use pickray_math::{Point3, TRIANGLE_EPSILON};

use super::{HitLocation, HitMode, TriangleHit};
use crate::{Polygon, Ray};

/// Unnormalized quantities of an accepted triangle hit.
///
/// Dividing by `dir_dot_norm` is left to callers that want a location, so
/// existence-only queries skip it.
struct TriangleSolve {
    dir_dot_norm: f64,
    dir_dot_diff_x_edge2: f64,
    dir_dot_edge1_x_diff: f64,
    diff_dot_norm: f64,
}

impl TriangleSolve {
    fn hit(&self) -> TriangleHit {
        let inv = 1.0 / self.dir_dot_norm;
        TriangleHit {
            t: self.diff_dot_norm * inv,
            w1: self.dir_dot_diff_x_edge2 * inv,
            w2: self.dir_dot_edge1_x_diff * inv,
        }
    }
}

impl Ray {
    fn solve_triangle(&self, a: &Point3, b: &Point3, c: &Point3) -> Option<TriangleSolve> {
        let direction = self.direction();
        let diff = self.origin() - a;
        let edge1 = b - a;
        let edge2 = c - a;
        let normal = edge1.cross(&edge2);

        // Fold the winding into `sign` so one-sided inequalities work for
        // front and back faces alike.
        let dir_dot_norm = direction.dot(&normal);
        let sign = if dir_dot_norm > TRIANGLE_EPSILON {
            1.0
        } else if dir_dot_norm < -TRIANGLE_EPSILON {
            -1.0
        } else {
            // Parallel to the triangle's plane.
            return None;
        };
        let dir_dot_norm = dir_dot_norm * sign;

        let dir_dot_diff_x_edge2 = sign * direction.dot(&diff.cross(&edge2));
        if dir_dot_diff_x_edge2 >= 0.0 {
            let dir_dot_edge1_x_diff = sign * direction.dot(&edge1.cross(&diff));
            if dir_dot_edge1_x_diff >= 0.0
                && dir_dot_diff_x_edge2 + dir_dot_edge1_x_diff <= dir_dot_norm
            {
                let diff_dot_norm = -sign * diff.dot(&normal);
                if diff_dot_norm >= 0.0 {
                    return Some(TriangleSolve {
                        dir_dot_norm,
                        dir_dot_diff_x_edge2,
                        dir_dot_edge1_x_diff,
                        diff_dot_norm,
                    });
                }
            }
        }
        None
    }

    /// Whether the ray hits the triangle `(a, b, c)`, either face.
    ///
    /// Cheaper than [`Ray::intersect_triangle`]: no hit data is derived.
    pub fn hits_triangle(&self, a: &Point3, b: &Point3, c: &Point3) -> bool {
        self.solve_triangle(a, b, c).is_some()
    }

    /// Ray parameter and barycentric weights of the hit on triangle `(a, b, c)`.
    ///
    /// Returns `None` if the ray is parallel to the triangle's plane, passes
    /// outside the triangle, or meets it behind the origin. The ray's
    /// `length` does not bound the search.
    pub fn intersect_triangle(&self, a: &Point3, b: &Point3, c: &Point3) -> Option<TriangleHit> {
        self.solve_triangle(a, b, c).map(|solve| solve.hit())
    }

    /// Intersect triangle `(a, b, c)`, reporting the hit as `mode` asks.
    pub fn intersects_triangle(
        &self,
        a: &Point3,
        b: &Point3,
        c: &Point3,
        mode: HitMode,
    ) -> Option<HitLocation> {
        let hit = self.intersect_triangle(a, b, c)?;
        Some(match mode {
            HitMode::World => HitLocation::World(self.at(hit.t)),
            HitMode::Planar => HitLocation::Planar(hit),
        })
    }

    /// Whether the ray hits the polygon.
    pub fn hits(&self, polygon: &Polygon) -> bool {
        polygon
            .triangles()
            .any(|[a, b, c]| self.hits_triangle(&a, &b, &c))
    }

    /// First hit on the polygon's triangles.
    ///
    /// For a quad the weights refer to whichever of `{0, 1, 2}` or
    /// `{0, 2, 3}` was hit; the first one is tried first.
    pub fn intersect_polygon(&self, polygon: &Polygon) -> Option<TriangleHit> {
        polygon
            .triangles()
            .find_map(|[a, b, c]| self.intersect_triangle(&a, &b, &c))
    }

    /// Intersect a triangle or quad, reporting the hit as `mode` asks.
    pub fn intersects(&self, polygon: &Polygon, mode: HitMode) -> Option<HitLocation> {
        polygon
            .triangles()
            .find_map(|[a, b, c]| self.intersects_triangle(&a, &b, &c, mode))
    }

    /// Like [`Ray::intersects`] for an untyped vertex list.
    ///
    /// Lists that are neither a triangle nor a quad never match.
    pub fn intersects_vertices(&self, vertices: &[Point3], mode: HitMode) -> Option<HitLocation> {
        let polygon = Polygon::from_vertices(vertices).ok()?;
        self.intersects(&polygon, mode)
    }

    /// Distance from the origin to the polygon, or `f64::INFINITY` on a miss.
    ///
    /// Suitable for picking the nearest of many candidates by plain `<`.
    pub fn distance_to_primitive(&self, polygon: &Polygon) -> f64 {
        match self.intersect_polygon(polygon) {
            Some(hit) => (self.at(hit.t) - self.origin()).norm(),
            None => f64::INFINITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pickray_math::{Vec2, Vec3};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn unit_quad() -> Polygon {
        Polygon::Quad([
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ])
    }

    #[test]
    fn test_centroid_hit_weights_sum_to_one() {
        let triangles = [
            [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)],
            [p(-2.0, 1.0, 3.0), p(4.0, -1.0, 0.5), p(1.0, 5.0, -2.0)],
            [p(10.0, 10.0, 10.0), p(10.0, 12.0, 10.0), p(10.0, 10.0, 13.0)],
        ];
        for [a, b, c] in triangles {
            let centroid = Point3::from((a.coords + b.coords + c.coords) / 3.0);
            let normal = (b - a).cross(&(c - a)).normalize();
            for side in [1.0, -1.0] {
                let ray = Ray::from_to(centroid + normal * (5.0 * side), centroid);
                let hit = ray.intersect_triangle(&a, &b, &c).expect("centroid hit");
                assert_relative_eq!(hit.w0() + hit.w1 + hit.w2, 1.0, epsilon = 1e-9);
                assert_relative_eq!(hit.w1, 1.0 / 3.0, epsilon = 1e-9);
                assert_relative_eq!(hit.w2, 1.0 / 3.0, epsilon = 1e-9);
                assert_relative_eq!(hit.t, 5.0, epsilon = 1e-9);
                assert!(ray.hits_triangle(&a, &b, &c));
            }
        }
    }

    #[test]
    fn test_parallel_ray_misses() {
        let (a, b, c) = (p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0));
        for dir in [Vec3::x(), Vec3::y(), Vec3::new(1.0, -1.0, 0.0)] {
            // In the plane itself and offset above it.
            for z in [0.0, 1.0] {
                let ray = Ray::with_direction(p(-1.0, 0.2, z), dir);
                assert!(!ray.hits_triangle(&a, &b, &c));
                assert!(ray.intersect_triangle(&a, &b, &c).is_none());
            }
        }
    }

    #[test]
    fn test_outside_triangle_misses() {
        let (a, b, c) = (p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0));
        let ray = Ray::from_to(p(0.8, 0.8, 1.0), p(0.8, 0.8, -1.0));
        assert!(ray.intersect_triangle(&a, &b, &c).is_none());
        let ray = Ray::from_to(p(-0.1, 0.5, 1.0), p(-0.1, 0.5, -1.0));
        assert!(!ray.hits_triangle(&a, &b, &c));
    }

    #[test]
    fn test_behind_origin_misses() {
        let (a, b, c) = (p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0));
        let ray = Ray::with_direction(p(0.2, 0.2, 1.0), Vec3::z());
        assert!(ray.intersect_triangle(&a, &b, &c).is_none());
    }

    #[test]
    fn test_world_and_planar_modes() {
        let (a, b, c) = (p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0));
        let ray = Ray::with_direction(p(0.25, 0.5, 1.0), -Vec3::z());

        let world = ray.intersects_triangle(&a, &b, &c, HitMode::World).unwrap();
        assert_relative_eq!(world.world_point().unwrap(), p(0.25, 0.5, 0.0), epsilon = 1e-12);

        let planar = ray.intersects_triangle(&a, &b, &c, HitMode::Planar).unwrap();
        assert_relative_eq!(planar.packed(), Vec3::new(1.0, 0.25, 0.5), epsilon = 1e-12);
    }

    #[test]
    fn test_planar_weights_interpolate_texcoords() {
        let (a, b, c) = (p(0.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(0.0, 2.0, 0.0));
        let (uv_a, uv_b, uv_c) = (Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0));
        let ray = Ray::from_to(p(0.5, 1.0, 3.0), p(0.5, 1.0, 0.0));
        let hit = ray.intersect_triangle(&a, &b, &c).unwrap();
        let uv = hit.interpolate(uv_a, uv_b, uv_c);
        assert_relative_eq!(uv, Vec2::new(0.25, 0.5), epsilon = 1e-12);
        let pos = hit.interpolate(a.coords, b.coords, c.coords);
        assert_relative_eq!(Point3::from(pos), ray.at(hit.t), epsilon = 1e-12);
    }

    #[test]
    fn test_unit_quad_hit() {
        let ray = Ray::from_to(p(0.5, 0.5, 5.0), p(0.5, 0.5, -5.0));
        let hit = ray.intersects(&unit_quad(), HitMode::World).unwrap();
        assert_relative_eq!(hit.world_point().unwrap(), p(0.5, 0.5, 0.0), epsilon = 1e-12);
        assert!(ray.hits(&unit_quad()));
    }

    #[test]
    fn test_quad_second_triangle() {
        // (0.2, 0.8) lies in {0, 2, 3} only.
        let ray = Ray::from_to(p(0.2, 0.8, 1.0), p(0.2, 0.8, -1.0));
        let hit = ray.intersects(&unit_quad(), HitMode::World).unwrap();
        assert_relative_eq!(hit.world_point().unwrap(), p(0.2, 0.8, 0.0), epsilon = 1e-12);

        let quad = unit_quad();
        let [a, _, c, d] = match quad {
            Polygon::Quad(v) => v,
            Polygon::Triangle(_) => unreachable!(),
        };
        let planar = ray.intersect_polygon(&quad).unwrap();
        let point = planar.interpolate(a.coords, c.coords, d.coords);
        assert_relative_eq!(Point3::from(point), p(0.2, 0.8, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_quad_miss() {
        let ray = Ray::from_to(p(1.5, 0.5, 1.0), p(1.5, 0.5, -1.0));
        assert!(ray.intersects(&unit_quad(), HitMode::World).is_none());
        assert!(!ray.hits(&unit_quad()));
    }

    #[test]
    fn test_intersects_vertices_unsupported_count() {
        let ray = Ray::from_to(p(0.5, 0.5, 5.0), p(0.5, 0.5, -5.0));
        let two = [p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.0)];
        assert!(ray.intersects_vertices(&two, HitMode::World).is_none());
        let five = [
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.5, 1.5, 0.0),
            p(0.0, 1.0, 0.0),
        ];
        assert!(ray.intersects_vertices(&five, HitMode::World).is_none());
        let three = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)];
        assert!(ray.intersects_vertices(&three, HitMode::World).is_some());
    }

    #[test]
    fn test_distance_to_primitive() {
        let ray = Ray::from_to(p(0.5, 0.5, 5.0), p(0.5, 0.5, -5.0));
        assert_relative_eq!(ray.distance_to_primitive(&unit_quad()), 5.0, epsilon = 1e-12);

        let away = Ray::from_to(p(0.5, 0.5, 5.0), p(0.5, 0.5, 10.0));
        let tri = Polygon::Triangle([p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)]);
        assert_eq!(away.distance_to_primitive(&tri), f64::INFINITY);
    }

    #[test]
    fn test_distance_to_primitive_with_raw_direction() {
        // Non-unit direction: distance is still Euclidean.
        let ray = Ray::with_direction(p(0.5, 0.5, 4.0), Vec3::new(0.0, 0.0, -2.0));
        assert_relative_eq!(ray.distance_to_primitive(&unit_quad()), 4.0, epsilon = 1e-12);
    }
}
