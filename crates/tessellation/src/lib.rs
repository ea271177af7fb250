pub mod export;
pub mod validate;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use wing_kernel::geometry::point::Point3d;
use wing_kernel::operations::loft::TriangleSink;

pub use export::{mesh_to_obj, mesh_to_stl};
pub use validate::{MeshValidation, validate_mesh};

/// A triangle mesh for rendering.
///
/// Every triangle owns its three vertices so that each carries the flat
/// normal of its face.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriangleMesh {
    /// Vertex positions [x, y, z, x, y, z, ...]
    pub positions: Vec<f32>,
    /// Vertex normals [nx, ny, nz, ...]
    pub normals: Vec<f32>,
    /// Triangle indices [i0, i1, i2, ...]
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn add_vertex(&mut self, pos: Point3d, normal: Vector3<f64>) -> u32 {
        let idx = self.vertex_count() as u32;
        self.positions.push(pos.x as f32);
        self.positions.push(pos.y as f32);
        self.positions.push(pos.z as f32);
        self.normals.push(normal.x as f32);
        self.normals.push(normal.y as f32);
        self.normals.push(normal.z as f32);
        idx
    }

    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.push(i0);
        self.indices.push(i1);
        self.indices.push(i2);
    }

    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.vertex_count() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        for &idx in &other.indices {
            self.indices.push(idx + offset);
        }
    }

    /// Position of vertex `index`.
    pub fn position(&self, index: u32) -> [f32; 3] {
        let i = index as usize * 3;
        [self.positions[i], self.positions[i + 1], self.positions[i + 2]]
    }

    /// Axis-aligned bounds of all vertices as `(min, max)`.
    pub fn bounds(&self) -> Option<([f32; 3], [f32; 3])> {
        if self.positions.len() < 3 {
            return None;
        }
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for chunk in self.positions.chunks(3) {
            for i in 0..3 {
                min[i] = min[i].min(chunk[i]);
                max[i] = max[i].max(chunk[i]);
            }
        }
        Some((min, max))
    }
}

/// Unit normal of the triangle `a, b, c` by the right-hand rule.
///
/// Degenerate triangles get `+z`.
pub fn face_normal(a: Point3d, b: Point3d, c: Point3d) -> Vector3<f64> {
    let ab = Vector3::new(b.x - a.x, b.y - a.y, b.z - a.z);
    let ac = Vector3::new(c.x - a.x, c.y - a.y, c.z - a.z);
    ab.cross(&ac)
        .try_normalize(1e-12)
        .unwrap_or_else(Vector3::z)
}

impl TriangleSink for TriangleMesh {
    fn push_triangle(&mut self, a: Point3d, b: Point3d, c: Point3d) {
        let normal = face_normal(a, b, c);
        let i0 = self.add_vertex(a, normal);
        let i1 = self.add_vertex(b, normal);
        let i2 = self.add_vertex(c, normal);
        self.add_triangle(i0, i1, i2);
    }
}
