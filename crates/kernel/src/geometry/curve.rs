use serde::{Deserialize, Serialize};

use super::bounds::Box2d;
use super::intersection::segment_segment;
use super::point::Point2d;
use crate::operations::OperationError;

/// An open polyline in the sketch plane.
///
/// Curves are parametrized by arc length measured from the first vertex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    vertices: Vec<Point2d>,
}

impl Curve {
    pub fn new(vertices: Vec<Point2d>) -> Self {
        Self { vertices }
    }

    /// Straight two-vertex curve.
    pub fn segment(a: Point2d, b: Point2d) -> Self {
        Self::new(vec![a, b])
    }

    /// Build from raw coordinates, rejecting non-finite values.
    pub fn try_from_coords(coords: &[[f64; 2]]) -> Result<Self, OperationError> {
        let mut vertices = Vec::with_capacity(coords.len());
        for (index, c) in coords.iter().enumerate() {
            if !c[0].is_finite() || !c[1].is_finite() {
                return Err(OperationError::NonFiniteVertex { index });
            }
            vertices.push(Point2d::from_array(*c));
        }
        Ok(Self::new(vertices))
    }

    pub fn vertices(&self) -> &[Point2d] {
        &self.vertices
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn push(&mut self, p: Point2d) {
        self.vertices.push(p);
    }

    pub fn first_vertex(&self) -> Option<Point2d> {
        self.vertices.first().copied()
    }

    pub fn last_vertex(&self) -> Option<Point2d> {
        self.vertices.last().copied()
    }

    /// Consecutive vertex pairs.
    pub fn spans(&self) -> impl Iterator<Item = (Point2d, Point2d)> + '_ {
        self.vertices.windows(2).map(|w| (w[0], w[1]))
    }

    /// Total length; zero for fewer than two vertices.
    pub fn perimeter(&self) -> f64 {
        self.spans().map(|(a, b)| a.distance_to(&b)).sum()
    }

    /// The point `s` units along the curve from its first vertex.
    ///
    /// Returns `None` for curves with fewer than two vertices, for negative
    /// `s`, and for `s` beyond the perimeter (a relative slack of
    /// [`Tolerance::parametric`](crate::Tolerance) absorbs rounding).
    pub fn point_at_arc_length(&self, s: f64) -> Option<Point2d> {
        if self.vertices.len() < 2 || s < 0.0 {
            return None;
        }
        let tol = crate::default_tolerance();
        let perimeter = self.perimeter();
        if s > perimeter + tol.parametric * perimeter.max(1.0) {
            return None;
        }

        let mut before = 0.0;
        for (a, b) in self.spans() {
            let len = a.distance_to(&b);
            if before + len >= s {
                if tol.is_zero_length(len) {
                    return Some(a);
                }
                let t = ((s - before) / len).clamp(0.0, 1.0);
                return Some(a.lerp(&b, t));
            }
            before += len;
        }
        self.last_vertex()
    }

    /// Cumulative arc-length fraction at each vertex: `0.0` first, `1.0` last.
    ///
    /// `None` when the perimeter is zero.
    pub fn vertex_fractions(&self) -> Option<Vec<f64>> {
        let perimeter = self.perimeter();
        if self.vertices.len() < 2 || crate::default_tolerance().is_zero_length(perimeter) {
            return None;
        }
        let mut fractions = Vec::with_capacity(self.vertices.len());
        let mut walked = 0.0;
        fractions.push(0.0);
        for (a, b) in self.spans() {
            walked += a.distance_to(&b);
            fractions.push(walked / perimeter);
        }
        Some(fractions)
    }

    pub fn bounding_box(&self) -> Option<Box2d> {
        Box2d::from_points(&self.vertices)
    }

    /// Every crossing between `self` and `other`.
    ///
    /// Hits are ordered along `self`: by segment, then by position within
    /// the segment. The first hit is the one nearest `self`'s start.
    pub fn intersections(&self, other: &Curve) -> Vec<Point2d> {
        let mut points = Vec::new();
        for (p0, p1) in self.spans() {
            let mut hits: Vec<(f64, Point2d)> = other
                .spans()
                .filter_map(|(q0, q1)| segment_segment(p0, p1, q0, q1))
                .map(|hit| (hit.t, hit.point))
                .collect();
            hits.sort_by(|a, b| a.0.total_cmp(&b.0));
            points.extend(hits.into_iter().map(|(_, p)| p));
        }
        points
    }

    pub fn reverse(&mut self) {
        self.vertices.reverse();
    }

    /// Reverse so the first vertex is the leftmost endpoint.
    ///
    /// Returns `true` if the curve was reversed.
    pub fn orient_leftmost_first(&mut self) -> bool {
        match (self.first_vertex(), self.last_vertex()) {
            (Some(first), Some(last)) if first.x > last.x => {
                self.reverse();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn zigzag() -> Curve {
        Curve::new(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(3.0, 4.0),
            Point2d::new(6.0, 0.0),
        ])
    }

    #[test]
    fn test_perimeter() {
        assert_abs_diff_eq!(zigzag().perimeter(), 10.0, epsilon = 1e-12);
        assert_eq!(Curve::new(vec![Point2d::new(1.0, 1.0)]).perimeter(), 0.0);
        assert_eq!(Curve::default().perimeter(), 0.0);
    }

    #[test]
    fn test_point_at_arc_length_interpolates() {
        let c = zigzag();
        let p = c.point_at_arc_length(2.5).unwrap();
        assert_abs_diff_eq!(p.x, 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 2.0, epsilon = 1e-12);

        let p = c.point_at_arc_length(7.5).unwrap();
        assert_abs_diff_eq!(p.x, 4.5, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_point_at_arc_length_endpoints() {
        let c = zigzag();
        assert_eq!(c.point_at_arc_length(0.0), Some(Point2d::new(0.0, 0.0)));
        let end = c.point_at_arc_length(c.perimeter()).unwrap();
        assert_abs_diff_eq!(end.x, 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(end.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_point_at_arc_length_out_of_range() {
        let c = zigzag();
        assert!(c.point_at_arc_length(10.5).is_none());
        assert!(c.point_at_arc_length(-0.1).is_none());
        assert!(Curve::new(vec![Point2d::ORIGIN]).point_at_arc_length(0.0).is_none());
    }

    #[test]
    fn test_point_at_arc_length_skips_zero_length_segment() {
        let c = Curve::new(vec![
            Point2d::new(0.0, 0.0),
            Point2d::new(0.0, 0.0),
            Point2d::new(2.0, 0.0),
        ]);
        let p = c.point_at_arc_length(1.0).unwrap();
        assert_abs_diff_eq!(p.x, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_vertex_fractions() {
        let f = zigzag().vertex_fractions().unwrap();
        assert_eq!(f.len(), 3);
        assert_abs_diff_eq!(f[0], 0.0);
        assert_abs_diff_eq!(f[1], 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(f[2], 1.0, epsilon = 1e-12);
        assert!(Curve::segment(Point2d::ORIGIN, Point2d::ORIGIN).vertex_fractions().is_none());
    }

    #[test]
    fn test_intersections_ordered_along_caller() {
        let probe = Curve::segment(Point2d::new(1.0, 10.0), Point2d::new(1.0, -10.0));
        let other = Curve::new(vec![
            Point2d::new(0.0, -2.0),
            Point2d::new(2.0, -2.0),
            Point2d::new(2.0, 5.0),
            Point2d::new(0.0, 5.0),
        ]);
        let hits = probe.intersections(&other);
        assert_eq!(hits.len(), 2);
        // The upper line is nearer the probe's start even though it is the
        // later segment of `other`.
        assert_abs_diff_eq!(hits[0].y, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hits[1].y, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_no_intersections() {
        let a = Curve::segment(Point2d::new(0.0, 0.0), Point2d::new(1.0, 0.0));
        let b = Curve::segment(Point2d::new(0.0, 1.0), Point2d::new(1.0, 1.0));
        assert!(a.intersections(&b).is_empty());
    }

    #[test]
    fn test_orient_leftmost_first() {
        let mut c = Curve::new(vec![Point2d::new(5.0, 0.0), Point2d::new(1.0, 1.0)]);
        assert!(c.orient_leftmost_first());
        assert_eq!(c.first_vertex(), Some(Point2d::new(1.0, 1.0)));
        assert!(!c.orient_leftmost_first());
    }

    #[test]
    fn test_bounding_box() {
        let bb = zigzag().bounding_box().unwrap();
        assert_eq!(bb.min, Point2d::new(0.0, 0.0));
        assert_eq!(bb.max, Point2d::new(6.0, 4.0));
        assert!(Curve::default().bounding_box().is_none());
    }

    #[test]
    fn test_try_from_coords_rejects_nan() {
        let err = Curve::try_from_coords(&[[0.0, 0.0], [f64::NAN, 1.0]]).unwrap_err();
        assert!(matches!(err, OperationError::NonFiniteVertex { index: 1 }));
        assert_eq!(Curve::try_from_coords(&[[1.0, 2.0]]).unwrap().num_vertices(), 1);
    }
}
