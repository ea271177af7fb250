use nalgebra::{Matrix3, Vector3};

use super::point::Point2d;
use super::vector::Vec2;

/// A 2D affine frame: origin plus two basis axes.
///
/// Stored as a homogeneous 3x3 matrix whose columns are the x axis, the
/// y axis and the origin. [`Frame::transform_point`] maps local coordinates
/// into the parent space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    matrix: Matrix3<f64>,
}

impl Frame {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
        }
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self::from_axes(Point2d::new(dx, dy), Vec2::X, Vec2::Y)
    }

    /// Rotation about the origin by `angle` radians.
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_axes(Point2d::ORIGIN, Vec2::new(c, s), Vec2::new(-s, c))
    }

    pub fn from_axes(origin: Point2d, x_axis: Vec2, y_axis: Vec2) -> Self {
        #[rustfmt::skip]
        let matrix = Matrix3::new(
            x_axis.x, y_axis.x, origin.x,
            x_axis.y, y_axis.y, origin.y,
            0.0,      0.0,      1.0,
        );
        Self { matrix }
    }

    pub fn origin(&self) -> Point2d {
        Point2d::new(self.matrix[(0, 2)], self.matrix[(1, 2)])
    }

    pub fn x_axis(&self) -> Vec2 {
        Vec2::new(self.matrix[(0, 0)], self.matrix[(1, 0)])
    }

    pub fn y_axis(&self) -> Vec2 {
        Vec2::new(self.matrix[(0, 1)], self.matrix[(1, 1)])
    }

    pub fn transform_point(&self, p: &Point2d) -> Point2d {
        let v = self.matrix * Vector3::new(p.x, p.y, 1.0);
        Point2d::new(v.x, v.y)
    }

    /// Apply `self` after `other`.
    pub fn then(&self, other: &Frame) -> Frame {
        Frame {
            matrix: self.matrix * other.matrix,
        }
    }

    /// The inverse frame, or `None` if the axes are collinear.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Frame { matrix })
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_identity_frame() {
        let p = Frame::identity().transform_point(&Point2d::new(1.0, 2.0));
        assert_abs_diff_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_translation() {
        let p = Frame::translation(10.0, -5.0).transform_point(&Point2d::new(1.0, 2.0));
        assert_abs_diff_eq!(p.x, 11.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, -3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_quarter_turn() {
        let p = Frame::rotation(FRAC_PI_2).transform_point(&Point2d::new(1.0, 0.0));
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_axes_accessors() {
        let f = Frame::from_axes(Point2d::new(3.0, 4.0), Vec2::new(0.0, 1.0), Vec2::new(-1.0, 0.0));
        assert_eq!(f.origin(), Point2d::new(3.0, 4.0));
        assert_eq!(f.x_axis(), Vec2::new(0.0, 1.0));
        assert_eq!(f.y_axis(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_inverse_round_trip() {
        let f = Frame::from_axes(Point2d::new(2.0, -1.0), Vec2::new(0.6, 0.8), Vec2::new(-0.8, 0.6));
        let inv = f.inverse().unwrap();
        let p = Point2d::new(7.5, -3.25);
        let back = inv.transform_point(&f.transform_point(&p));
        assert_abs_diff_eq!(back.x, p.x, epsilon = 1e-12);
        assert_abs_diff_eq!(back.y, p.y, epsilon = 1e-12);
    }

    #[test]
    fn test_collinear_axes_have_no_inverse() {
        let f = Frame::from_axes(Point2d::ORIGIN, Vec2::X, Vec2::X * 2.0);
        assert!(f.inverse().is_none());
    }

    #[test]
    fn test_compose() {
        let f = Frame::translation(1.0, 0.0).then(&Frame::rotation(FRAC_PI_2));
        let p = f.transform_point(&Point2d::new(1.0, 0.0));
        assert_abs_diff_eq!(p.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);
    }
}
