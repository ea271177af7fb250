use super::point::Point2d;

/// Slack on the segment parameters so that endpoint touches still count.
const PARAM_EPS: f64 = 1e-12;

/// A hit between two bounded segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    pub point: Point2d,
    /// Parameter along the first segment, in `[0, 1]`.
    pub t: f64,
    /// Parameter along the second segment, in `[0, 1]`.
    pub u: f64,
}

/// Intersect segment `p0 -> p1` with segment `q0 -> q1`.
///
/// Parallel and collinear pairs (including zero-length segments) yield no
/// hit; overlapping collinear segments are not reported.
pub fn segment_segment(p0: Point2d, p1: Point2d, q0: Point2d, q1: Point2d) -> Option<SegmentHit> {
    let r = p1 - p0;
    let s = q1 - q0;
    let denom = r.cross(&s);
    let scale = r.length() * s.length();
    if scale == 0.0 || denom.abs() <= 1e-12 * scale {
        return None;
    }

    let qp = q0 - p0;
    let t = qp.cross(&s) / denom;
    let u = qp.cross(&r) / denom;
    let range = -PARAM_EPS..=1.0 + PARAM_EPS;
    if !range.contains(&t) || !range.contains(&u) {
        return None;
    }

    let t = t.clamp(0.0, 1.0);
    Some(SegmentHit {
        point: p0 + r * t,
        t,
        u: u.clamp(0.0, 1.0),
    })
}
