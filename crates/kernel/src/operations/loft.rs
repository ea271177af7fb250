use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::geometry::point::Point3d;
use crate::operations::section::SectionBuilder;

/// A flat triangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [Point3d; 3],
}

impl Triangle {
    pub fn new(a: Point3d, b: Point3d, c: Point3d) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// The nine coordinates `[ax, ay, az, bx, by, bz, cx, cy, cz]`.
    pub fn flat(&self) -> [f64; 9] {
        let [a, b, c] = self.vertices;
        [a.x, a.y, a.z, b.x, b.y, b.z, c.x, c.y, c.z]
    }
}

/// Receiver of emitted triangles.
pub trait TriangleSink {
    fn push_triangle(&mut self, a: Point3d, b: Point3d, c: Point3d);
}

impl TriangleSink for Vec<Triangle> {
    fn push_triangle(&mut self, a: Point3d, b: Point3d, c: Point3d) {
        self.push(Triangle::new(a, b, c));
    }
}

/// Emit the quad between two consecutive point pairs of adjacent sections.
///
/// `prev_a`/`a` lie on the inboard section, `prev_b`/`b` on the outboard one.
/// Returns the number of triangles emitted.
pub fn emit_quad(
    prev_a: Point3d,
    prev_b: Point3d,
    a: Point3d,
    b: Point3d,
    mirror: bool,
    sink: &mut dyn TriangleSink,
) -> usize {
    sink.push_triangle(prev_a, a, b);
    sink.push_triangle(prev_a, b, prev_b);
    if !mirror {
        return 2;
    }
    // Mirrored half has opposite winding.
    let (ma, mb) = (a.mirrored_x(), b.mirrored_x());
    let (mpa, mpb) = (prev_a.mirrored_x(), prev_b.mirrored_x());
    sink.push_triangle(mpa, mb, ma);
    sink.push_triangle(mpa, mpb, mb);
    4
}

/// Emit the strip of triangles between sections `a` and `b`.
///
/// Points are paired by index; extra points on the longer section are
/// ignored. The first pair only seeds the strip.
pub fn emit_between_sections(
    a: &[Point3d],
    b: &[Point3d],
    mirror: bool,
    sink: &mut dyn TriangleSink,
) -> usize {
    let mut emitted = 0;
    let mut prev: Option<(Point3d, Point3d)> = None;
    for (&pa, &pb) in a.iter().zip(b.iter()) {
        if let Some((prev_a, prev_b)) = prev {
            emitted += emit_quad(prev_a, prev_b, pa, pb, mirror, sink);
        }
        prev = Some((pa, pb));
    }
    emitted
}

/// Loft the whole wing into `sink`.
///
/// Every section is built before any triangle is emitted: if one fails,
/// the wing contributes nothing. Returns the number of triangles emitted.
#[instrument(skip(builder, sink))]
pub fn emit_wing(builder: &SectionBuilder<'_>, mirror: bool, sink: &mut dyn TriangleSink) -> usize {
    let pairs = builder.layout().span_pairs(builder.curves());

    let mut sections: Vec<(Vec<Point3d>, Vec<Point3d>)> = Vec::with_capacity(pairs.len());
    let mut last: Option<(f64, Vec<Point3d>)> = None;
    for &(s0, s1) in &pairs {
        let inboard = match last.take() {
            Some((span, section)) if span == s0 => Some(section),
            _ => builder.build(s0),
        };
        let Some(inboard) = inboard else {
            debug!(station = s0, "section failed, wing skipped");
            return 0;
        };
        let Some(outboard) = builder.build(s1) else {
            debug!(station = s1, "section failed, wing skipped");
            return 0;
        };
        last = Some((s1, outboard.clone()));
        sections.push((inboard, outboard));
    }

    let mut emitted = 0;
    for (a, b) in &sections {
        emitted += emit_between_sections(a, b, mirror, sink);
    }
    debug!(sections = sections.len(), triangles = emitted, "wing emitted");
    emitted
}
