//! # Triangle Mesh
//!
//! Engine-neutral triangle mesh used by every serializer and the renderer.
//! Engines tessellate their native solids into a [`Mesh3D`]; writers never
//! see engine types.

use nalgebra::{Point3, Vector3};

/// A 3D triangle made up of three vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle3D {
    pub vertices: [Point3<f64>; 3],
    pub normal: Vector3<f64>,
}

impl Triangle3D {
    pub fn new(v1: Point3<f64>, v2: Point3<f64>, v3: Point3<f64>) -> Self {
        let edge1 = v2 - v1;
        let edge2 = v3 - v1;
        // Degenerate triangles get a zero normal instead of NaN
        let normal = edge1
            .cross(&edge2)
            .try_normalize(1e-12)
            .unwrap_or_else(Vector3::zeros);

        Self {
            vertices: [v1, v2, v3],
            normal,
        }
    }

    /// Get bounding box of the triangle
    pub fn bounds(&self) -> (Point3<f64>, Point3<f64>) {
        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for vertex in &self.vertices[1..] {
            min.x = min.x.min(vertex.x);
            min.y = min.y.min(vertex.y);
            min.z = min.z.min(vertex.z);
            max.x = max.x.max(vertex.x);
            max.y = max.y.max(vertex.y);
            max.z = max.z.max(vertex.z);
        }

        (min, max)
    }

    /// Triangle area
    pub fn area(&self) -> f64 {
        let edge1 = self.vertices[1] - self.vertices[0];
        let edge2 = self.vertices[2] - self.vertices[0];
        edge1.cross(&edge2).norm() * 0.5
    }
}

/// A 3D mesh model
#[derive(Debug, Clone)]
pub struct Mesh3D {
    pub triangles: Vec<Triangle3D>,
    pub bounds_min: Point3<f64>,
    pub bounds_max: Point3<f64>,
}

impl Mesh3D {
    pub fn new(triangles: Vec<Triangle3D>) -> Self {
        let mut mesh = Self {
            triangles,
            bounds_min: Point3::origin(),
            bounds_max: Point3::origin(),
        };
        mesh.calculate_bounds();
        mesh
    }

    /// Closed, outward-facing triangulation of an axis-aligned box.
    pub fn cuboid(min: Point3<f64>, max: Point3<f64>) -> Self {
        let corner = |x: bool, y: bool, z: bool| {
            Point3::new(
                if x { max.x } else { min.x },
                if y { max.y } else { min.y },
                if z { max.z } else { min.z },
            )
        };

        // Each face as a counter-clockwise quad seen from outside
        let faces = [
            [corner(false, false, false), corner(false, true, false), corner(true, true, false), corner(true, false, false)],
            [corner(false, false, true), corner(true, false, true), corner(true, true, true), corner(false, true, true)],
            [corner(false, false, false), corner(true, false, false), corner(true, false, true), corner(false, false, true)],
            [corner(false, true, false), corner(false, true, true), corner(true, true, true), corner(true, true, false)],
            [corner(false, false, false), corner(false, false, true), corner(false, true, true), corner(false, true, false)],
            [corner(true, false, false), corner(true, true, false), corner(true, true, true), corner(true, false, true)],
        ];

        let triangles = faces
            .iter()
            .flat_map(|[a, b, c, d]| {
                [Triangle3D::new(*a, *b, *c), Triangle3D::new(*a, *c, *d)]
            })
            .collect();

        Self::new(triangles)
    }

    fn calculate_bounds(&mut self) {
        let Some(first) = self.triangles.first() else {
            return;
        };

        let (mut min, mut max) = first.bounds();

        for triangle in &self.triangles[1..] {
            let (tri_min, tri_max) = triangle.bounds();
            min.x = min.x.min(tri_min.x);
            min.y = min.y.min(tri_min.y);
            min.z = min.z.min(tri_min.z);
            max.x = max.x.max(tri_max.x);
            max.y = max.y.max(tri_max.y);
            max.z = max.z.max(tri_max.z);
        }

        self.bounds_min = min;
        self.bounds_max = max;
    }

    /// Translate the mesh
    pub fn translate(&mut self, offset: Vector3<f64>) {
        for triangle in &mut self.triangles {
            for vertex in &mut triangle.vertices {
                *vertex += offset;
            }
        }
        self.calculate_bounds();
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Size of the bounding box along each axis
    pub fn extents(&self) -> Vector3<f64> {
        self.bounds_max - self.bounds_min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_is_closed_box() {
        let mesh = Mesh3D::cuboid(Point3::new(-1.0, -1.5, -2.0), Point3::new(1.0, 1.5, 2.0));
        assert_eq!(mesh.len(), 12);
        assert_eq!(mesh.bounds_min, Point3::new(-1.0, -1.5, -2.0));
        assert_eq!(mesh.bounds_max, Point3::new(1.0, 1.5, 2.0));

        let area: f64 = mesh.triangles.iter().map(Triangle3D::area).sum();
        // 2 * (2*3 + 2*4 + 3*4)
        assert!((area - 52.0).abs() < 1e-9);
    }

    #[test]
    fn test_cuboid_normals_point_outward() {
        let mesh = Mesh3D::cuboid(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let center = Point3::new(0.5, 0.5, 0.5);
        for tri in &mesh.triangles {
            let to_face = tri.vertices[0] - center;
            assert!(tri.normal.dot(&to_face) > 0.0);
        }
    }

    #[test]
    fn test_translate_updates_bounds() {
        let mut mesh = Mesh3D::cuboid(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        mesh.translate(Vector3::new(2.0, 0.0, -1.0));
        assert_eq!(mesh.bounds_min, Point3::new(2.0, 0.0, -1.0));
        assert_eq!(mesh.extents(), Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_degenerate_triangle_has_zero_normal() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let tri = Triangle3D::new(p, p, p);
        assert_eq!(tri.normal, Vector3::zeros());
        assert_eq!(tri.area(), 0.0);
    }
}
