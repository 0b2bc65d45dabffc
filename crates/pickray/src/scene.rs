//! Named primitive collections loaded from JSON or TOML.
//!
//! A scene file is a flat list of primitives, each tagged with its `kind`:
//!
//! ```toml
//! [[primitives]]
//! name = "floor"
//! kind = "plane"
//! normal = [0.0, 0.0, 1.0]
//! constant = 0.0
//!
//! [[primitives]]
//! name = "panel"
//! kind = "polygon"
//! vertices = [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]]
//! ```

use std::path::Path;

use pickray_math::{Point3, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, SceneError};
use crate::{Aabb3, HitLocation, HitMode, Picker, Plane, Polygon, Ray};

/// Serialized form of one primitive's geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeDef {
    /// Triangle or quad; any other vertex count is rejected on load.
    Polygon {
        /// Vertex positions.
        vertices: Vec<[f64; 3]>,
    },
    /// Plane `normal · p = constant`.
    Plane {
        /// Plane normal.
        normal: [f64; 3],
        /// Offset constant.
        constant: f64,
    },
    /// Axis-aligned box.
    Box {
        /// Minimum corner.
        min: [f64; 3],
        /// Maximum corner.
        max: [f64; 3],
    },
}

/// Serialized form of a named primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveDef {
    /// Name reported when the primitive is picked.
    pub name: String,
    /// Geometry.
    #[serde(flatten)]
    pub shape: ShapeDef,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SceneFile {
    #[serde(default)]
    primitives: Vec<PrimitiveDef>,
}

/// Validated geometry of a scene primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    /// Triangle or quad.
    Polygon(Polygon),
    /// Infinite plane.
    Plane(Plane),
    /// Axis-aligned box.
    Box(Aabb3),
}

impl Primitive {
    fn from_def(def: &PrimitiveDef) -> Result<Self> {
        let primitive = match &def.shape {
            ShapeDef::Polygon { vertices } => {
                let points: Vec<Point3> = vertices.iter().map(|&v| Point3::from(v)).collect();
                let polygon =
                    Polygon::from_vertices(&points).map_err(|source| SceneError::Polygon {
                        name: def.name.clone(),
                        source,
                    })?;
                Self::Polygon(polygon)
            }
            ShapeDef::Plane { normal, constant } => {
                Self::Plane(Plane::new(Vec3::from(*normal), *constant))
            }
            ShapeDef::Box { min, max } => {
                Self::Box(Aabb3::new(Point3::from(*min), Point3::from(*max)))
            }
        };
        Ok(primitive)
    }
}

/// The nearest primitive a ray meets in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenePick<'a> {
    /// Name of the primitive.
    pub name: &'a str,
    /// Distance from the ray origin to the hit.
    pub distance: f64,
    /// Where the hit is.
    ///
    /// Planar locations are only produced for polygons; planes and boxes
    /// always report world positions.
    pub location: HitLocation,
}

/// A flat list of named primitives.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    primitives: Vec<(String, Primitive)>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primitive.
    pub fn push(&mut self, name: impl Into<String>, primitive: Primitive) {
        self.primitives.push((name.into(), primitive));
    }

    /// Parse a JSON scene.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let file: SceneFile = serde_json::from_str(text)?;
        Self::from_file(file)
    }

    /// Parse a TOML scene.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: SceneFile = toml::from_str(text)?;
        Self::from_file(file)
    }

    /// Load a scene, choosing the format by file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scene = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&text)?,
            Some("toml") => Self::from_toml_str(&text)?,
            _ => return Err(SceneError::UnknownFormat(path.to_path_buf())),
        };
        info!(path = %path.display(), primitives = scene.len(), "loaded scene");
        Ok(scene)
    }

    fn from_file(file: SceneFile) -> Result<Self> {
        let primitives = file
            .primitives
            .iter()
            .map(|def| Ok((def.name.clone(), Primitive::from_def(def)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { primitives })
    }

    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// True if the scene has no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Iterate over `(name, primitive)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Primitive)> {
        self.primitives.iter().map(|(name, p)| (name.as_str(), p))
    }

    /// Find the primitive the ray meets first.
    ///
    /// Ties go to the primitive listed first.
    pub fn pick(&self, ray: &Ray, mode: HitMode) -> Option<ScenePick<'_>> {
        let mut picker = Picker::new(*ray);
        for (index, (_, primitive)) in self.primitives.iter().enumerate() {
            match primitive {
                Primitive::Polygon(polygon) => picker.offer_polygon(index, polygon),
                Primitive::Plane(plane) => picker.offer_plane(index, plane),
                Primitive::Box(aabb) => picker.offer_aabb(index, aabb),
            };
        }

        let best = picker.finish()?;
        let (name, primitive) = &self.primitives[best.key];
        let location = match (primitive, mode) {
            (Primitive::Polygon(polygon), HitMode::Planar) => ray
                .intersect_polygon(polygon)
                .map(HitLocation::Planar)
                .unwrap_or(HitLocation::World(best.point)),
            _ => HitLocation::World(best.point),
        };
        debug!(name = %name, distance = best.distance, "picked primitive");
        Some(ScenePick {
            name,
            distance: best.distance,
            location,
        })
    }

    /// Every primitive the ray meets, nearest first.
    pub fn hits(&self, ray: &Ray) -> Vec<ScenePick<'_>> {
        let mut hits: Vec<ScenePick<'_>> = self
            .primitives
            .iter()
            .filter_map(|(name, primitive)| {
                let mut picker = Picker::new(*ray);
                match primitive {
                    Primitive::Polygon(polygon) => picker.offer_polygon((), polygon),
                    Primitive::Plane(plane) => picker.offer_plane((), plane),
                    Primitive::Box(aabb) => picker.offer_aabb((), aabb),
                };
                picker.finish().map(|pick| ScenePick {
                    name,
                    distance: pick.distance,
                    location: HitLocation::World(pick.point),
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
