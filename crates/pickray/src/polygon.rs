//! Pickable polygons: triangles and quads.

use pickray_math::Point3;

use crate::error::PolygonError;

/// A triangle or a planar quad given by world-space vertices.
///
/// A quad is tested as the two triangles `{0, 1, 2}` and `{0, 2, 3}`, which
/// share the diagonal from vertex 0 to vertex 2.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Polygon {
    /// Three vertices.
    Triangle([Point3; 3]),
    /// Four vertices, wound in order around the boundary.
    Quad([Point3; 4]),
}

impl Polygon {
    /// Build a polygon from an untyped vertex list.
    ///
    /// Any count other than 3 or 4 is rejected.
    pub fn from_vertices(vertices: &[Point3]) -> Result<Self, PolygonError> {
        match *vertices {
            [a, b, c] => Ok(Self::Triangle([a, b, c])),
            [a, b, c, d] => Ok(Self::Quad([a, b, c, d])),
            _ => Err(PolygonError::UnsupportedVertexCount(vertices.len())),
        }
    }

    /// The polygon's vertices.
    pub fn vertices(&self) -> &[Point3] {
        match self {
            Self::Triangle(v) => v,
            Self::Quad(v) => v,
        }
    }

    /// The triangles the intersection test visits, in order.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        let (first, second) = match *self {
            Self::Triangle([a, b, c]) => ([a, b, c], None),
            Self::Quad([a, b, c, d]) => ([a, b, c], Some([a, c, d])),
        };
        std::iter::once(first).chain(second)
    }
}

impl TryFrom<&[Point3]> for Polygon {
    type Error = PolygonError;

    fn try_from(vertices: &[Point3]) -> Result<Self, Self::Error> {
        Self::from_vertices(vertices)
    }
}

impl From<[Point3; 3]> for Polygon {
    fn from(v: [Point3; 3]) -> Self {
        Self::Triangle(v)
    }
}

impl From<[Point3; 4]> for Polygon {
    fn from(v: [Point3; 4]) -> Self {
        Self::Quad(v)
    }
}
