#![warn(missing_docs)]

//! Ray picking kernel.
//!
//! Closed-form ray queries against the primitives an editor or engine needs
//! for picking and gizmo hit-testing: triangles, quads, planes and
//! axis-aligned boxes, plus point-to-ray distance.
//!
//! # Architecture
//!
//! - [`Ray`] - origin, direction, cached inverse direction, and length
//! - [`intersect`] - the per-primitive intersection tests, as `Ray` methods
//! - [`pick`] - nearest-hit selection over many candidates
//! - [`scene`] - named primitive lists loaded from JSON or TOML
//!
//! Every query is total: a miss is `None`, `false`, or `f64::INFINITY`,
//! never an error, and none of them allocate.
//!
//! # Example
//!
//! ```
//! use pickray::{HitMode, Polygon, Ray};
//! use pickray_math::Point3;
//!
//! let quad = Polygon::Quad([
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//! ]);
//! let ray = Ray::from_to(Point3::new(0.5, 0.5, 5.0), Point3::new(0.5, 0.5, -5.0));
//!
//! let hit = ray.intersects(&quad, HitMode::World).unwrap();
//! assert_eq!(hit.world_point(), Some(Point3::new(0.5, 0.5, 0.0)));
//! assert_eq!(ray.distance_to_primitive(&quad), 5.0);
//! ```

mod aabb;
pub mod error;
pub mod intersect;
pub mod pick;
mod plane;
mod polygon;
mod ray;
pub mod scene;

pub use aabb::Aabb3;
pub use error::{PolygonError, SceneError};
pub use intersect::{HitLocation, HitMode, TriangleHit};
pub use pick::{nearest_aabb, nearest_polygon, Pick, Picker};
pub use plane::Plane;
pub use polygon::Polygon;
pub use ray::{Ray, DEFAULT_LENGTH};
pub use scene::{Primitive, Scene, ScenePick};
