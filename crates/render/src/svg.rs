//! Shaded SVG previews of wing meshes.

use std::fmt::Write;

use wing_tessellation::TriangleMesh;
use wing_types::Color;

/// Simple isometric projection: 3D -> 2D
fn project(x: f64, y: f64, z: f64) -> (f64, f64) {
    let angle_x: f64 = 0.6;
    let angle_z: f64 = 0.8;
    let rx = x * angle_z.cos() - y * angle_z.sin();
    let ry = x * angle_z.sin() + y * angle_z.cos();
    let pz = ry * angle_x.sin() + z * angle_x.cos();
    (rx, -pz)
}

struct TriInfo {
    corners: [usize; 3],
    depth: f64,
    brightness: f64,
    is_backface: bool,
}

fn vertex(mesh: &TriangleMesh, i: usize) -> [f64; 3] {
    [
        mesh.positions[i * 3] as f64,
        mesh.positions[i * 3 + 1] as f64,
        mesh.positions[i * 3 + 2] as f64,
    ]
}

/// Escape text for use inside an SVG element.
fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render `mesh` as flat-shaded polygons, painter-sorted by depth.
///
/// Front faces take `color`; back faces are drawn in red so open or
/// inverted surfaces stand out.
pub fn mesh_to_svg(mesh: &TriangleMesh, width: f64, height: f64, title: &str, color: Color) -> String {
    let title = escape_xml(title);
    if mesh.indices.is_empty() {
        return format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\">\
             <text x=\"10\" y=\"20\" font-family=\"monospace\" font-size=\"14\" fill=\"#ccc\">{title}</text>\
             </svg>"
        );
    }

    let num_verts = mesh.vertex_count();
    let projected: Vec<(f64, f64)> = (0..num_verts)
        .map(|i| {
            let [x, y, z] = vertex(mesh, i);
            project(x, y, z)
        })
        .collect();
    let (mut min_x, mut max_x) = (f64::MAX, f64::MIN);
    let (mut min_y, mut max_y) = (f64::MAX, f64::MIN);
    for &(px, py) in &projected {
        min_x = min_x.min(px);
        max_x = max_x.max(px);
        min_y = min_y.min(py);
        max_y = max_y.max(py);
    }

    let padding = 40.0;
    let avail_w = width - 2.0 * padding;
    let avail_h = height - 2.0 * padding - 25.0;
    let data_w = (max_x - min_x).max(0.001);
    let data_h = (max_y - min_y).max(0.001);
    let scale = (avail_w / data_w).min(avail_h / data_h);
    let offset_x = padding + (avail_w - data_w * scale) / 2.0;
    let offset_y = padding + 25.0 + (avail_h - data_h * scale) / 2.0;
    let screen = |i: usize| -> (f64, f64) {
        let (px, py) = projected[i];
        ((px - min_x) * scale + offset_x, (py - min_y) * scale + offset_y)
    };

    let light = [0.3_f64, -0.5, 0.8];
    let light_len = (light[0] * light[0] + light[1] * light[1] + light[2] * light[2]).sqrt();

    let mut tris: Vec<TriInfo> = mesh
        .indices
        .chunks_exact(3)
        .map(|t| {
            let corners = [t[0] as usize, t[1] as usize, t[2] as usize];
            let [p0, p1, p2] = corners.map(|i| vertex(mesh, i));
            let depth = (p0[2] + p1[2] + p2[2]) / 3.0;

            let a = [p1[0] - p0[0], p1[1] - p0[1], p1[2] - p0[2]];
            let b = [p2[0] - p0[0], p2[1] - p0[1], p2[2] - p0[2]];
            let n = [
                a[1] * b[2] - a[2] * b[1],
                a[2] * b[0] - a[0] * b[2],
                a[0] * b[1] - a[1] * b[0],
            ];
            let n_len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt().max(1e-12);
            let dot = (n[0] * light[0] + n[1] * light[1] + n[2] * light[2]) / (n_len * light_len);

            // Negative projected area: the inside of the surface faces the viewer.
            let [(x0, y0), (x1, y1), (x2, y2)] = corners.map(|i| projected[i]);
            let signed_area = (x1 - x0) * (y2 - y0) - (x2 - x0) * (y1 - y0);

            TriInfo {
                corners,
                depth,
                brightness: 0.3 + 0.7 * dot.abs().min(1.0),
                is_backface: signed_area < 0.0,
            }
        })
        .collect();
    tris.sort_by(|a, b| a.depth.total_cmp(&b.depth));

    let num_tris = tris.len();
    let stroke_width = if num_tris > 200 { 0.2 } else { 0.5 };
    let stroke_color = if num_tris > 200 { "#222240" } else { "#2a2a4a" };

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" style=\"background:#1a1a2e\">\n\
         <text x=\"{}\" y=\"20\" font-family=\"monospace\" font-size=\"13\" fill=\"#8892b0\" text-anchor=\"middle\">{title}</text>\n",
        width / 2.0
    );

    for tri in &tris {
        let [(x0, y0), (x1, y1), (x2, y2)] = tri.corners.map(screen);
        let b = tri.brightness;
        let (r, g, bl) = if tri.is_backface {
            ((220.0 * b) as u8, (80.0 * b) as u8, (60.0 * b) as u8)
        } else {
            (
                (color.r as f64 * b) as u8,
                (color.g as f64 * b) as u8,
                (color.b as f64 * b) as u8,
            )
        };
        let _ = writeln!(
            svg,
            "  <polygon points=\"{x0:.1},{y0:.1} {x1:.1},{y1:.1} {x2:.1},{y2:.1}\" \
             fill=\"rgb({r},{g},{bl})\" stroke=\"{stroke_color}\" stroke-width=\"{stroke_width}\"/>"
        );
    }

    let _ = writeln!(
        svg,
        "  <text x=\"{}\" y=\"{}\" font-family=\"monospace\" font-size=\"10\" fill=\"#5a6080\" \
         text-anchor=\"middle\">{} triangles, {} vertices</text>",
        width / 2.0,
        height - 8.0,
        num_tris,
        num_verts
    );

    svg.push_str("</svg>\n");
    svg
}
