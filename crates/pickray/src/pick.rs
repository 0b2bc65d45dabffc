//! Nearest-hit selection over many candidates.
//!
//! Picking and gizmo handle selection both reduce to "which of these
//! primitives does the ray meet first". These helpers keep only the running
//! closest candidate, so a query over any number of primitives allocates
//! nothing.

use pickray_math::Point3;

use crate::{Aabb3, Plane, Polygon, Ray};

/// Closest polygon hit among a candidate list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonPick {
    /// Position of the polygon in the candidate sequence.
    pub index: usize,
    /// Distance from the ray origin to the hit.
    pub distance: f64,
    /// World-space hit point.
    pub point: Point3,
}

/// Closest box hit among a candidate list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxPick {
    /// Position of the box in the candidate sequence.
    pub index: usize,
    /// Entry parameter; negative when the origin is inside the box.
    pub t: f64,
}

/// Find the polygon the ray meets first. Ties keep the earlier candidate.
pub fn nearest_polygon<'a>(
    ray: &Ray,
    polygons: impl IntoIterator<Item = &'a Polygon>,
) -> Option<PolygonPick> {
    let mut closest: Option<PolygonPick> = None;
    let mut closest_distance = f64::INFINITY;

    for (index, polygon) in polygons.into_iter().enumerate() {
        let Some(hit) = ray.intersect_polygon(polygon) else {
            continue;
        };
        let point = ray.at(hit.t);
        let distance = (point - ray.origin()).norm();
        if distance < closest_distance {
            closest_distance = distance;
            closest = Some(PolygonPick {
                index,
                distance,
                point,
            });
        }
    }

    closest
}

/// Find the box with the smallest entry parameter.
///
/// Boxes containing the origin have negative entry parameters and so win
/// over boxes ahead of it.
pub fn nearest_aabb<'a>(ray: &Ray, boxes: impl IntoIterator<Item = &'a Aabb3>) -> Option<BoxPick> {
    let inv = ray.inverse_direction();
    boxes
        .into_iter()
        .enumerate()
        .filter_map(|(index, aabb)| {
            ray.intersects_aabox(&aabb.min, &aabb.max, &inv)
                .map(|t| BoxPick { index, t })
        })
        .fold(None, |best: Option<BoxPick>, pick| match best {
            Some(b) if b.t <= pick.t => Some(b),
            _ => Some(pick),
        })
}

/// A candidate accepted by a [`Picker`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick<K> {
    /// Caller-supplied identifier of the candidate.
    pub key: K,
    /// Distance from the ray origin to the hit.
    pub distance: f64,
    /// World-space hit point.
    pub point: Point3,
}

/// Running closest-hit accumulator over mixed primitive kinds.
///
/// ```
/// use pickray::{Picker, Plane, Polygon, Ray};
/// use pickray_math::Point3;
///
/// let ray = Ray::from_to(Point3::new(0.2, 0.2, 5.0), Point3::new(0.2, 0.2, 0.0));
/// let mut picker = Picker::new(ray);
/// picker.offer_plane("floor", &Plane::xy());
/// picker.offer_polygon(
///     "handle",
///     &Polygon::Triangle([
///         Point3::new(0.0, 0.0, 1.0),
///         Point3::new(1.0, 0.0, 1.0),
///         Point3::new(0.0, 1.0, 1.0),
///     ]),
/// );
/// assert_eq!(picker.finish().map(|p| p.key), Some("handle"));
/// ```
#[derive(Debug, Clone)]
pub struct Picker<K> {
    ray: Ray,
    max_distance: f64,
    closest: Option<Pick<K>>,
}

impl<K> Picker<K> {
    /// Start picking along `ray` with no distance limit.
    pub fn new(ray: Ray) -> Self {
        Self {
            ray,
            max_distance: f64::INFINITY,
            closest: None,
        }
    }

    /// Ignore hits farther than `max_distance` from the origin.
    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// The ray being cast.
    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    /// Offer a hit found by other means. Returns true if it became the
    /// closest.
    pub fn offer_hit(&mut self, key: K, distance: f64, point: Point3) -> bool {
        let closer = match &self.closest {
            Some(best) => distance < best.distance,
            None => true,
        };
        if !closer || distance > self.max_distance {
            return false;
        }
        self.closest = Some(Pick {
            key,
            distance,
            point,
        });
        true
    }

    /// Offer a triangle or quad.
    pub fn offer_polygon(&mut self, key: K, polygon: &Polygon) -> bool {
        match self.ray.intersect_polygon(polygon) {
            Some(hit) => {
                let point = self.ray.at(hit.t);
                let distance = (point - self.ray.origin()).norm();
                self.offer_hit(key, distance, point)
            }
            None => false,
        }
    }

    /// Offer an infinite plane.
    pub fn offer_plane(&mut self, key: K, plane: &Plane) -> bool {
        match self.ray.intersects_plane(plane) {
            Some(point) => {
                let distance = (point - self.ray.origin()).norm();
                self.offer_hit(key, distance, point)
            }
            None => false,
        }
    }

    /// Offer a box. A box around the origin is hit at distance zero.
    pub fn offer_aabb(&mut self, key: K, aabb: &Aabb3) -> bool {
        match self.ray.intersect_aabb(aabb) {
            Some(t) => {
                let point = self.ray.at(t.max(0.0));
                let distance = (point - self.ray.origin()).norm();
                self.offer_hit(key, distance, point)
            }
            None => false,
        }
    }

    /// Closest candidate so far.
    pub fn closest(&self) -> Option<&Pick<K>> {
        self.closest.as_ref()
    }

    /// Consume the picker, returning the closest candidate.
    pub fn finish(self) -> Option<Pick<K>> {
        self.closest
    }
}
