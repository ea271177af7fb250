//! Cross-section construction at a spanwise station.

use crate::geometry::curve::Curve;
use crate::geometry::point::{Point2d, Point3d};
use crate::geometry::vector::Vec2;
use crate::operations::profile::{ProfileFrame, normalize_profile_point};

/// Length of the probe cast from a leading-edge point towards the trailing edge.
pub const TRAILING_EDGE_PROBE_LENGTH: f64 = 1000.0;

/// Spanwise fraction below which the centre section counts as the centreline.
pub const CENTRE_STRAIGHT_LIMIT: f64 = 0.01;

/// Trailing edges ending closer than this to x = 0 produce no sketch spans.
pub const MIN_TRAILING_EDGE_EXTENT: f64 = 0.001;

/// The five resolved input curves of a wing. Any may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WingCurves {
    pub leading_edge: Option<Curve>,
    pub trailing_edge: Option<Curve>,
    pub root_profile: Option<Curve>,
    pub tip_profile: Option<Curve>,
    pub angle_graph: Option<Curve>,
}

impl WingCurves {
    /// All present curves, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Curve> {
        [
            &self.leading_edge,
            &self.trailing_edge,
            &self.root_profile,
            &self.tip_profile,
            &self.angle_graph,
        ]
        .into_iter()
        .flatten()
    }
}

/// Strategy deciding where sections are cut and where profiles are sampled.
pub trait SectionLayout {
    /// Adjacent spanwise parameter pairs, root to tip.
    fn span_pairs(&self, curves: &WingCurves) -> Vec<(f64, f64)>;

    /// Profile fractions in `[0, 1]` sampled on every section, or `None` if
    /// they cannot be derived from the inputs.
    fn profile_fractions(&self, curves: &WingCurves) -> Option<Vec<f64>>;

    /// Whether the section at `span` ignores the profile shapes.
    fn force_straight(&self, span: f64) -> bool;
}

/// Sections at the trailing edge's own vertices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SketchSpanLayout {
    pub centre_straight: bool,
}

impl SectionLayout for SketchSpanLayout {
    fn span_pairs(&self, curves: &WingCurves) -> Vec<(f64, f64)> {
        let Some(trailing) = curves.trailing_edge.as_ref() else {
            return Vec::new();
        };
        let Some(last) = trailing.last_vertex() else {
            return Vec::new();
        };
        let x_max = last.x;
        if x_max < MIN_TRAILING_EDGE_EXTENT {
            return Vec::new();
        }
        trailing
            .spans()
            .map(|(a, b)| (a.x / x_max, b.x / x_max))
            .collect()
    }

    fn profile_fractions(&self, curves: &WingCurves) -> Option<Vec<f64>> {
        curves.root_profile.as_ref()?.vertex_fractions()
    }

    fn force_straight(&self, span: f64) -> bool {
        self.centre_straight && span < CENTRE_STRAIGHT_LIMIT
    }
}

/// Evenly spaced sections and profile samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedCountLayout {
    pub num_sections: u32,
    pub num_profile_points: u32,
}

impl SectionLayout for FixedCountLayout {
    fn span_pairs(&self, _curves: &WingCurves) -> Vec<(f64, f64)> {
        let n = self.num_sections;
        (0..n)
            .map(|i| (i as f64 / n as f64, (i + 1) as f64 / n as f64))
            .collect()
    }

    fn profile_fractions(&self, _curves: &WingCurves) -> Option<Vec<f64>> {
        let p = self.num_profile_points;
        if p == 0 {
            return Some(vec![0.0]);
        }
        Some((0..=p).map(|j| j as f64 / p as f64).collect())
    }

    fn force_straight(&self, _span: f64) -> bool {
        false
    }
}

/// Builds 3D cross-sections from resolved wing curves.
pub struct SectionBuilder<'a> {
    curves: &'a WingCurves,
    root_frame: Option<&'a ProfileFrame>,
    tip_frame: Option<&'a ProfileFrame>,
    layout: &'a dyn SectionLayout,
    fractions: Option<Vec<f64>>,
}

impl<'a> SectionBuilder<'a> {
    pub fn new(
        curves: &'a WingCurves,
        root_frame: Option<&'a ProfileFrame>,
        tip_frame: Option<&'a ProfileFrame>,
        layout: &'a dyn SectionLayout,
    ) -> Self {
        let fractions = layout.profile_fractions(curves);
        Self {
            curves,
            root_frame,
            tip_frame,
            layout,
            fractions,
        }
    }

    pub fn curves(&self) -> &WingCurves {
        self.curves
    }

    pub fn layout(&self) -> &dyn SectionLayout {
        self.layout
    }

    /// Point `span` of the way along the leading edge.
    pub fn leading_edge_point(&self, span: f64) -> Option<Point2d> {
        let leading = self.curves.leading_edge.as_ref()?;
        let perimeter = leading.perimeter();
        leading.point_at_arc_length((span * perimeter).clamp(0.0, perimeter))
    }

    /// First trailing-edge crossing of a probe cast in -y from `leading`.
    pub fn trailing_edge_point(&self, leading: Point2d) -> Option<Point2d> {
        let trailing = self.curves.trailing_edge.as_ref()?;
        let probe = Curve::segment(
            leading,
            leading + Vec2::new(0.0, -TRAILING_EDGE_PROBE_LENGTH),
        );
        probe.intersections(trailing).into_iter().next()
    }

    /// Twist at `span` in radians; zero without an angle graph or a hit.
    pub fn twist_angle(&self, span: f64) -> f64 {
        let Some(graph) = self.curves.angle_graph.as_ref() else {
            return 0.0;
        };
        let Some(bb) = graph.bounding_box() else {
            return 0.0;
        };
        let x = bb.min.x + bb.width() * span;
        let probe = Curve::segment(
            Point2d::new(x, bb.min.y - 1.0),
            Point2d::new(x, bb.max.y + 1.0),
        );
        match probe.intersections(graph).first() {
            Some(hit) => (hit.y - bb.min.y).to_radians(),
            None => 0.0,
        }
    }

    /// Root and tip profile samples blended at `span`, in chord units.
    pub fn unitized_points(&self, span: f64) -> Option<Vec<Point2d>> {
        let fractions = self.fractions.as_ref()?;
        let straight = self.layout.force_straight(span);
        let blend = span.clamp(0.0, 1.0);
        fractions
            .iter()
            .map(|&fraction| {
                let root = normalize_profile_point(
                    self.curves.root_profile.as_ref(),
                    fraction,
                    self.root_frame.map(|f| &f.inverse),
                    straight,
                )?;
                let tip = normalize_profile_point(
                    self.curves.tip_profile.as_ref(),
                    fraction,
                    self.tip_frame.map(|f| &f.inverse),
                    straight,
                )?;
                Some(root + (tip - root) * blend)
            })
            .collect()
    }

    /// The ordered 3D section at `span`.
    ///
    /// Fails without a trailing edge. When the trailing edge exists but the
    /// probe misses it, the chord collapses to zero and the section
    /// degenerates to the leading-edge point.
    pub fn build(&self, span: f64) -> Option<Vec<Point3d>> {
        self.curves.trailing_edge.as_ref()?;
        let leading = self.leading_edge_point(span)?;
        let (chord, chord_length) = match self.trailing_edge_point(leading) {
            Some(trailing) => (trailing - leading, leading.distance_to(&trailing)),
            None => (Vec2::ZERO, 0.0),
        };
        let points = self.unitized_points(span)?;
        let twist = self.twist_angle(span);

        Some(
            points
                .into_iter()
                .map(|p| {
                    let p = p.rotated(twist);
                    let planform = leading + chord * p.x;
                    Point3d::new(planform.x, planform.y, p.y * chord_length)
                })
                .collect(),
        )
    }
}
