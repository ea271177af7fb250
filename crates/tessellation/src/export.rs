//! Plain-text mesh writers.

use std::fmt::Write;

use crate::TriangleMesh;

/// ASCII STL with one facet per triangle, normals taken from the first
/// vertex of each triangle.
pub fn mesh_to_stl(mesh: &TriangleMesh, name: &str) -> String {
    let mut out = String::with_capacity(mesh.triangle_count() * 300);
    let _ = writeln!(out, "solid {name}");
    for tri in mesh.indices.chunks_exact(3) {
        let n = tri[0] as usize * 3;
        let _ = writeln!(
            out,
            "  facet normal {} {} {}",
            mesh.normals[n],
            mesh.normals[n + 1],
            mesh.normals[n + 2]
        );
        out.push_str("    outer loop\n");
        for &idx in tri {
            let [x, y, z] = mesh.position(idx);
            let _ = writeln!(out, "      vertex {x} {y} {z}");
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }
    let _ = writeln!(out, "endsolid {name}");
    out
}

/// Wavefront OBJ with per-vertex normals. OBJ indices are 1-based.
pub fn mesh_to_obj(mesh: &TriangleMesh) -> String {
    let mut out = String::with_capacity(mesh.vertex_count() * 60);
    for p in mesh.positions.chunks_exact(3) {
        let _ = writeln!(out, "v {} {} {}", p[0], p[1], p[2]);
    }
    for n in mesh.normals.chunks_exact(3) {
        let _ = writeln!(out, "vn {} {} {}", n[0], n[1], n[2]);
    }
    for tri in mesh.indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        let _ = writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}");
    }
    out
}
