//! Chord frames and unit-space sampling of aerofoil profiles.
//!
//! A profile curve is drawn at an arbitrary position, scale and angle. Its
//! chord (first vertex to last vertex) defines a frame; mapping samples
//! through the inverse of that frame and dividing by the chord length puts
//! the leading point at `(0, 0)` and the trailing point at `(1, 0)`.

use crate::geometry::curve::Curve;
use crate::geometry::frame::Frame;
use crate::geometry::point::Point2d;

/// The chord-aligned frame of a profile curve and its inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileFrame {
    /// Chord space to sketch space.
    pub frame: Frame,
    /// Sketch space to chord space.
    pub inverse: Frame,
    pub chord_length: f64,
}

impl ProfileFrame {
    /// Build the chord frame of `curve`.
    ///
    /// Origin is the first vertex, the x axis points along the chord and the
    /// y axis is its counter-clockwise perpendicular. `None` if the curve is
    /// absent, has fewer than two vertices or a chord too short to normalize.
    pub fn from_curve(curve: Option<&Curve>) -> Option<Self> {
        let curve = curve?;
        if curve.num_vertices() < 2 {
            return None;
        }
        let start = curve.first_vertex()?;
        let end = curve.last_vertex()?;
        let chord = end - start;
        let x_axis = chord.normalized()?;
        let frame = Frame::from_axes(start, x_axis, x_axis.perpendicular());
        let inverse = frame.inverse()?;
        Some(Self {
            frame,
            inverse,
            chord_length: chord.length(),
        })
    }
}

/// Sample `curve` at `fraction` of its perimeter and express the point in
/// chord units.
///
/// * `force_straight` or a missing curve gives the straight chord point
///   `(fraction, 0)`.
/// * A chord shorter than [`Tolerance::chord`](crate::Tolerance) gives
///   `(0, 0)`.
/// * A missing inverse frame gives `(fraction, 0)`.
///
/// `None` only when the curve cannot be sampled.
pub fn normalize_profile_point(
    curve: Option<&Curve>,
    fraction: f64,
    inverse: Option<&Frame>,
    force_straight: bool,
) -> Option<Point2d> {
    let straight = Point2d::new(fraction, 0.0);
    let Some(curve) = curve else {
        return Some(straight);
    };
    if force_straight {
        return Some(straight);
    }

    let (start, end) = (curve.first_vertex()?, curve.last_vertex()?);
    let chord = start.distance_to(&end);
    if crate::default_tolerance().is_degenerate_chord(chord) {
        return Some(Point2d::ORIGIN);
    }
    let Some(inverse) = inverse else {
        return Some(straight);
    };

    let perimeter = curve.perimeter();
    let s = (fraction * perimeter).clamp(0.0, perimeter);
    let sample = curve.point_at_arc_length(s)?;
    Some(inverse.transform_point(&sample).scaled(1.0 / chord))
}
