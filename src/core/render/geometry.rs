//=========================================================================
// Geometry Descriptions
//=========================================================================
//
// CPU-side descriptions of the primitives the scene builders produce.
// Backends turn these into buffers; point clouds carry their per-point
// attributes explicitly, analytic shapes only their parameters.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::Color;
use crate::core::math::Point3;

//=== ShapeKind ===========================================================

/// Solid shapes used by the floating wireframe objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Box,
    Octahedron,
    Icosahedron,
    Dodecahedron,
    TorusKnot,
}

impl ShapeKind {
    /// Every shape, in the order the builders sample from.
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Box,
        ShapeKind::Octahedron,
        ShapeKind::Icosahedron,
        ShapeKind::Dodecahedron,
        ShapeKind::TorusKnot,
    ];

    /// Vertex count of the shape's wireframe.
    pub fn vertex_count(self) -> usize {
        match self {
            Self::Box => 8,
            Self::Octahedron => 6,
            Self::Icosahedron => 12,
            Self::Dodecahedron => 20,
            // 64 tubular x 8 radial segments, seams duplicated
            Self::TorusKnot => 65 * 9,
        }
    }
}

//=== PointCloud ==========================================================

/// Point sprites with per-point size and color.
///
/// The three attribute arrays always have the same length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointCloud {
    pub positions: Vec<Point3>,
    pub sizes: Vec<f32>,
    pub colors: Vec<Color>,
}

impl PointCloud {
    /// Creates an empty cloud with room for `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            sizes: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
        }
    }

    /// Appends one point.
    pub fn push(&mut self, position: Point3, size: f32, color: Color) {
        self.positions.push(position);
        self.sizes.push(size);
        self.colors.push(color);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

//=== Geometry ============================================================

/// A drawable primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// Point sprites.
    Points(PointCloud),

    /// Platonic solid or torus knot scaled to `size`.
    Solid { shape: ShapeKind, size: f32 },

    /// UV sphere.
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },

    /// Thin torus lying in the XY plane.
    Ring {
        radius: f32,
        tube: f32,
        segments: u32,
    },

    /// Flat quad in the XY plane.
    Plane { width: f32, height: f32 },

    /// Line grid in the XZ plane.
    Grid { size: f32, divisions: u32 },
}

impl Geometry {
    /// Number of vertices the backend has to upload.
    pub fn vertex_count(&self) -> usize {
        match self {
            Self::Points(cloud) => cloud.len(),
            Self::Solid { shape, .. } => shape.vertex_count(),
            Self::Sphere {
                width_segments,
                height_segments,
                ..
            } => (*width_segments as usize + 1) * (*height_segments as usize + 1),
            // 8 radial segments around the tube
            Self::Ring { segments, .. } => (*segments as usize + 1) * 9,
            Self::Plane { .. } => 4,
            Self::Grid { divisions, .. } => (*divisions as usize + 1) * 4,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_cloud_keeps_attributes_aligned() {
        let mut cloud = PointCloud::with_capacity(2);
        cloud.push(Point3::origin(), 1.0, Color::WHITE);
        cloud.push(Point3::new(1.0, 0.0, 0.0), 0.5, Color::BLACK);

        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.sizes.len(), 2);
        assert_eq!(cloud.colors.len(), 2);
        assert!(!cloud.is_empty());
    }

    #[test]
    fn vertex_counts() {
        assert_eq!(Geometry::Points(PointCloud::default()).vertex_count(), 0);
        assert_eq!(Geometry::Plane { width: 1.0, height: 1.0 }.vertex_count(), 4);
        assert_eq!(
            Geometry::Sphere {
                radius: 1.0,
                width_segments: 4,
                height_segments: 2
            }
            .vertex_count(),
            15
        );
        assert_eq!(
            Geometry::Grid {
                size: 10.0,
                divisions: 5
            }
            .vertex_count(),
            24
        );
    }

    #[test]
    fn every_shape_has_vertices() {
        for shape in ShapeKind::ALL {
            assert!(shape.vertex_count() > 0, "{shape:?} has no vertices");
        }
    }
}
