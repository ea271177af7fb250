use tracing::{debug, info, instrument};
use wing_kernel::geometry::bounds::{insert_box, Box3d};
use wing_kernel::operations::loft::{emit_wing, TriangleSink};
use wing_kernel::operations::profile::ProfileFrame;
use wing_kernel::operations::section::{
    FixedCountLayout, SectionBuilder, SectionLayout, SketchSpanLayout, WingCurves,
};
use wing_kernel::Curve;
use wing_types::{Color, CurveSlot, GenerationMode, SketchId, WingConfig};

use crate::resolve::CurveResolver;
use crate::types::{CacheState, DerivedCache, DerivedState, PropertyError};

/// A lofted wing: persistent configuration plus cached derived geometry.
///
/// Every setter that changes the generated shape drops the cache; the next
/// query re-resolves the curves.
#[derive(Debug, Clone, Default)]
pub struct Wing {
    config: WingConfig,
    cache: DerivedCache,
}

impl Wing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: WingConfig) -> Self {
        Self {
            config,
            cache: DerivedCache::Unset,
        }
    }

    pub fn config(&self) -> &WingConfig {
        &self.config
    }

    pub fn cache_state(&self) -> CacheState {
        self.cache.state()
    }

    /// Drop derived geometry.
    pub fn invalidate(&mut self) {
        self.cache = DerivedCache::Unset;
    }

    // ── Configuration ───────────────────────────────────────────────────

    pub fn color(&self) -> Color {
        self.config.color
    }

    /// Colour is presentation only and keeps the cache.
    pub fn set_color(&mut self, color: Color) {
        self.config.color = color;
    }

    pub fn sketch(&self, slot: CurveSlot) -> Option<SketchId> {
        self.config.sketch(slot)
    }

    pub fn set_sketch(&mut self, slot: CurveSlot, sketch: Option<SketchId>) {
        self.config.set_sketch(slot, sketch);
        self.invalidate();
    }

    /// Whether any slot refers to `sketch`.
    pub fn uses_sketch(&self, sketch: SketchId) -> bool {
        self.config.sketches.contains(&Some(sketch))
    }

    pub fn mirror(&self) -> bool {
        self.config.mirror
    }

    pub fn set_mirror(&mut self, mirror: bool) {
        self.config.mirror = mirror;
        self.invalidate();
    }

    pub fn mode(&self) -> GenerationMode {
        self.config.mode
    }

    pub fn set_mode(&mut self, mode: GenerationMode) {
        self.config.mode = mode;
        self.invalidate();
    }

    pub fn set_centre_straight(&mut self, value: bool) -> Result<(), PropertyError> {
        match &mut self.config.mode {
            GenerationMode::SketchSpans { centre_straight } => *centre_straight = value,
            mode => return Err(not_available("centre_straight", mode)),
        }
        self.invalidate();
        Ok(())
    }

    pub fn set_num_sections(&mut self, value: u32) -> Result<(), PropertyError> {
        match &mut self.config.mode {
            GenerationMode::FixedCounts { num_sections, .. } => *num_sections = value,
            mode => return Err(not_available("num_sections", mode)),
        }
        self.invalidate();
        Ok(())
    }

    pub fn set_num_profile_points(&mut self, value: u32) -> Result<(), PropertyError> {
        match &mut self.config.mode {
            GenerationMode::FixedCounts {
                num_profile_points, ..
            } => *num_profile_points = value,
            mode => return Err(not_available("num_profile_points", mode)),
        }
        self.invalidate();
        Ok(())
    }

    // ── Derived geometry ────────────────────────────────────────────────

    /// The cached derived state, if it is valid.
    pub fn derived(&self) -> Option<&DerivedState> {
        match &self.cache {
            DerivedCache::Valid(state) => Some(state),
            _ => None,
        }
    }

    /// Resolve curves and frames unless the cache is already valid.
    #[instrument(skip_all)]
    pub fn ensure_derived(&mut self, resolver: &dyn CurveResolver) {
        if matches!(self.cache, DerivedCache::Valid(_)) {
            return;
        }
        self.cache = DerivedCache::Computing;
        let state = derive(&self.config, resolver);
        info!(
            curves = state.curves.iter().count(),
            has_bounds = state.bounds.is_some(),
            "wing rebuilt"
        );
        self.cache = DerivedCache::Valid(state);
    }

    /// Axis-aligned box of every resolved curve, lifted to z = 0.
    pub fn bounding_box(&mut self, resolver: &dyn CurveResolver) -> Option<Box3d> {
        self.ensure_derived(resolver);
        self.derived()?.bounds
    }

    /// Loft the wing into `sink`. Returns the number of triangles emitted.
    #[instrument(skip_all)]
    pub fn render_triangles(
        &mut self,
        resolver: &dyn CurveResolver,
        sink: &mut dyn TriangleSink,
    ) -> usize {
        self.ensure_derived(resolver);
        let Some(state) = self.derived() else {
            return 0;
        };
        let layout = layout_for(self.config.mode);
        let builder = SectionBuilder::new(
            &state.curves,
            state.root_frame.as_ref(),
            state.tip_frame.as_ref(),
            layout.as_ref(),
        );
        emit_wing(&builder, self.config.mirror, sink)
    }
}

/// Section layout strategy for a generation mode.
pub fn layout_for(mode: GenerationMode) -> Box<dyn SectionLayout> {
    match mode {
        GenerationMode::SketchSpans { centre_straight } => {
            Box::new(SketchSpanLayout { centre_straight })
        }
        GenerationMode::FixedCounts {
            num_sections,
            num_profile_points,
        } => Box::new(FixedCountLayout {
            num_sections,
            num_profile_points,
        }),
    }
}

/// Human-readable name of a generation mode.
pub fn mode_name(mode: &GenerationMode) -> &'static str {
    match mode {
        GenerationMode::SketchSpans { .. } => "sketch spans",
        GenerationMode::FixedCounts { .. } => "fixed counts",
    }
}

fn not_available(name: &str, mode: &GenerationMode) -> PropertyError {
    PropertyError::NotAvailable {
        name: name.to_string(),
        mode: mode_name(mode),
    }
}

fn resolve_slot(
    config: &WingConfig,
    slot: CurveSlot,
    resolver: &dyn CurveResolver,
) -> Option<Curve> {
    let id = config.sketch(slot)?;
    let Some(mut curve) = resolver.resolve(id) else {
        debug!(slot = slot.title(), sketch = %id, "sketch not found");
        return None;
    };
    if curve.num_vertices() < 2 {
        debug!(slot = slot.title(), sketch = %id, "sketch has fewer than two vertices");
        return None;
    }
    curve.orient_leftmost_first();
    Some(curve)
}

fn derive(config: &WingConfig, resolver: &dyn CurveResolver) -> DerivedState {
    let curves = WingCurves {
        leading_edge: resolve_slot(config, CurveSlot::LeadingEdge, resolver),
        trailing_edge: resolve_slot(config, CurveSlot::TrailingEdge, resolver),
        root_profile: resolve_slot(config, CurveSlot::RootProfile, resolver),
        tip_profile: resolve_slot(config, CurveSlot::TipProfile, resolver),
        angle_graph: resolve_slot(config, CurveSlot::AngleGraph, resolver),
    };

    let mut bounds = None;
    for curve in curves.iter() {
        if let Some(bb) = curve.bounding_box() {
            insert_box(&mut bounds, bb.to_box3d(0.0));
        }
    }

    DerivedState {
        root_frame: ProfileFrame::from_curve(curves.root_profile.as_ref()),
        tip_frame: ProfileFrame::from_curve(curves.tip_profile.as_ref()),
        curves,
        bounds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use wing_kernel::Point2d;

    fn resolver() -> HashMap<SketchId, Curve> {
        let mut map = HashMap::new();
        map.insert(
            SketchId(1),
            Curve::segment(Point2d::new(10.0, 0.0), Point2d::new(0.0, 0.0)),
        );
        map.insert(SketchId(2), Curve::new(vec![Point2d::new(1.0, 1.0)]));
        map
    }

    #[test]
    fn test_new_wing_is_unset() {
        let wing = Wing::new();
        assert_eq!(wing.cache_state(), CacheState::Unset);
        assert!(wing.derived().is_none());
    }

    #[test]
    fn test_resolution_orients_leftmost_first() {
        let mut wing = Wing::new();
        wing.set_sketch(CurveSlot::LeadingEdge, Some(SketchId(1)));
        wing.ensure_derived(&resolver());
        let leading = wing.derived().unwrap().curves.leading_edge.clone().unwrap();
        assert_eq!(leading.first_vertex(), Some(Point2d::new(0.0, 0.0)));
    }

    #[test]
    fn test_short_and_missing_sketches_are_dropped() {
        let mut wing = Wing::new();
        wing.set_sketch(CurveSlot::TrailingEdge, Some(SketchId(2)));
        wing.set_sketch(CurveSlot::RootProfile, Some(SketchId(99)));
        wing.ensure_derived(&resolver());
        let state = wing.derived().unwrap();
        assert!(state.curves.trailing_edge.is_none());
        assert!(state.curves.root_profile.is_none());
        assert!(state.bounds.is_none());
    }

    #[test]
    fn test_mode_setters_check_mode() {
        let mut wing = Wing::new();
        assert!(wing.set_centre_straight(false).is_ok());
        let err = wing.set_num_sections(4).unwrap_err();
        assert!(matches!(err, PropertyError::NotAvailable { .. }));

        wing.set_mode(GenerationMode::FixedCounts {
            num_sections: 2,
            num_profile_points: 10,
        });
        assert!(wing.set_num_sections(4).is_ok());
        assert!(wing.set_centre_straight(true).is_err());
        assert_eq!(
            wing.mode(),
            GenerationMode::FixedCounts {
                num_sections: 4,
                num_profile_points: 10
            }
        );
    }

    #[test]
    fn test_layout_for_mode() {
        let curves = WingCurves::default();
        let fixed = layout_for(GenerationMode::FixedCounts {
            num_sections: 3,
            num_profile_points: 1,
        });
        assert_eq!(fixed.span_pairs(&curves).len(), 3);
        let spans = layout_for(GenerationMode::default());
        assert!(spans.force_straight(0.0));
    }
}
