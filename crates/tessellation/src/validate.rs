//! Mesh quality summary.
//!
//! Sink meshes never share vertex indices between triangles, so edges are
//! matched by quantized position rather than by index.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::TriangleMesh;

/// Positions are matched on a 1e-4 grid.
const QUANTUM: f64 = 1e4;

type PosKey = (i64, i64, i64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshValidation {
    pub total_edges: usize,
    /// Edges used by exactly one triangle.
    pub boundary_edges: usize,
    /// Edges used by three or more triangles.
    pub non_manifold_edges: usize,
    /// Triangles with (near) zero area.
    pub degenerate_triangles: usize,
    /// Divergence-theorem volume; meaningful for closed meshes only.
    pub signed_volume: f64,
    pub surface_area: f64,
}

impl MeshValidation {
    pub fn is_watertight(&self) -> bool {
        self.total_edges > 0 && self.boundary_edges == 0 && self.non_manifold_edges == 0
    }

    pub fn is_printable(&self) -> bool {
        self.is_watertight() && self.signed_volume > 0.0
    }
}

fn quantize(v: f32) -> i64 {
    (v as f64 * QUANTUM).round() as i64
}

fn key(mesh: &TriangleMesh, idx: u32) -> PosKey {
    let [x, y, z] = mesh.position(idx);
    (quantize(x), quantize(y), quantize(z))
}

fn edge(a: PosKey, b: PosKey) -> (PosKey, PosKey) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Summarize edge connectivity, volume and area of `mesh`.
pub fn validate_mesh(mesh: &TriangleMesh) -> MeshValidation {
    let mut edge_counts: HashMap<(PosKey, PosKey), usize> = HashMap::new();
    let mut result = MeshValidation::default();
    let mut volume = 0.0f64;

    for tri in mesh.indices.chunks_exact(3) {
        let [ka, kb, kc] = [key(mesh, tri[0]), key(mesh, tri[1]), key(mesh, tri[2])];
        if ka == kb || kb == kc || kc == ka {
            result.degenerate_triangles += 1;
            continue;
        }
        for (a, b) in [(ka, kb), (kb, kc), (kc, ka)] {
            *edge_counts.entry(edge(a, b)).or_insert(0) += 1;
        }

        let [p0, p1, p2] = [tri[0], tri[1], tri[2]].map(|i| mesh.position(i).map(f64::from));
        // Signed volume of the tetrahedron formed with the origin.
        volume += p0[0] * (p1[1] * p2[2] - p2[1] * p1[2])
            + p1[0] * (p2[1] * p0[2] - p0[1] * p2[2])
            + p2[0] * (p0[1] * p1[2] - p1[1] * p0[2]);

        let a = [p1[0] - p0[0], p1[1] - p0[1], p1[2] - p0[2]];
        let b = [p2[0] - p0[0], p2[1] - p0[1], p2[2] - p0[2]];
        let c = [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ];
        result.surface_area += (c[0] * c[0] + c[1] * c[1] + c[2] * c[2]).sqrt() / 2.0;
    }

    result.total_edges = edge_counts.len();
    result.boundary_edges = edge_counts.values().filter(|&&c| c == 1).count();
    result.non_manifold_edges = edge_counts.values().filter(|&&c| c > 2).count();
    result.signed_volume = volume / 6.0;
    debug!(
        edges = result.total_edges,
        boundary = result.boundary_edges,
        degenerate = result.degenerate_triangles,
        "mesh validated"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use wing_kernel::geometry::point::Point3d;
    use wing_kernel::operations::loft::TriangleSink;

    fn tetrahedron() -> TriangleMesh {
        let o = Point3d::new(0.0, 0.0, 0.0);
        let x = Point3d::new(1.0, 0.0, 0.0);
        let y = Point3d::new(0.0, 1.0, 0.0);
        let z = Point3d::new(0.0, 0.0, 1.0);
        let mut mesh = TriangleMesh::new();
        mesh.push_triangle(o, y, x);
        mesh.push_triangle(o, x, z);
        mesh.push_triangle(o, z, y);
        mesh.push_triangle(x, y, z);
        mesh
    }

    #[test]
    fn test_closed_tetrahedron() {
        let v = validate_mesh(&tetrahedron());
        assert_eq!(v.total_edges, 6);
        assert_eq!(v.boundary_edges, 0);
        assert!(v.is_watertight());
        assert!(v.is_printable());
        assert_abs_diff_eq!(v.signed_volume, 1.0 / 6.0, epsilon = 1e-6);
    }

    #[test]
    fn test_open_sheet() {
        let mut mesh = TriangleMesh::new();
        mesh.push_triangle(
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 0.0, 0.0),
            Point3d::new(1.0, 1.0, 0.0),
        );
        mesh.push_triangle(
            Point3d::new(0.0, 0.0, 0.0),
            Point3d::new(1.0, 1.0, 0.0),
            Point3d::new(0.0, 1.0, 0.0),
        );
        let v = validate_mesh(&mesh);
        assert_eq!(v.total_edges, 5);
        assert_eq!(v.boundary_edges, 4);
        assert!(!v.is_watertight());
        assert_abs_diff_eq!(v.surface_area, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_triangles_are_counted() {
        let mut mesh = TriangleMesh::new();
        let p = Point3d::new(2.0, 2.0, 2.0);
        mesh.push_triangle(p, p, Point3d::new(3.0, 2.0, 2.0));
        let v = validate_mesh(&mesh);
        assert_eq!(v.degenerate_triangles, 1);
        assert_eq!(v.total_edges, 0);
        assert!(!v.is_watertight());
    }
}
