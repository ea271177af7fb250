use approx::assert_abs_diff_eq;

use wing_engine::{CacheState, EngineError, Wing, WingDocument};
use wing_kernel::Triangle;
use wing_tessellation::TriangleMesh;
use wing_types::{Color, ConfigValue, CurveSlot, GenerationMode, Sketch, SketchId};

// ── Helpers ─────────────────────────────────────────────────────────────

const LEADING: u32 = 1;
const TRAILING: u32 = 2;
const PROFILE: u32 = 3;
const ANGLE: u32 = 4;

fn sketches() -> Vec<Sketch> {
    vec![
        Sketch::new(LEADING, "leading", vec![[0.0, 0.0], [10.0, 0.0]]),
        Sketch::new(TRAILING, "trailing", vec![[0.0, -2.0], [10.0, -2.0]]),
        Sketch::new(PROFILE, "aerofoil", vec![[0.0, 0.0], [0.5, 0.3], [1.0, 0.0]]),
        Sketch::new(ANGLE, "twist", vec![[0.0, 0.0], [1.0, 5.0]]),
    ]
}

fn rectangular_wing(mode: GenerationMode) -> Wing {
    let mut wing = Wing::new();
    wing.set_mode(mode);
    wing.set_sketch(CurveSlot::LeadingEdge, Some(SketchId(LEADING)));
    wing.set_sketch(CurveSlot::TrailingEdge, Some(SketchId(TRAILING)));
    wing.set_sketch(CurveSlot::RootProfile, Some(SketchId(PROFILE)));
    wing.set_sketch(CurveSlot::TipProfile, Some(SketchId(PROFILE)));
    wing
}

fn document_with(wing: Wing) -> (WingDocument, wing_engine::WingKey) {
    let mut doc = WingDocument::new();
    for sketch in sketches() {
        doc.insert_sketch(sketch);
    }
    let key = doc.add_wing("main wing", wing);
    (doc, key)
}

fn one_section() -> GenerationMode {
    GenerationMode::FixedCounts {
        num_sections: 1,
        num_profile_points: 2,
    }
}

// ── Scenarios ───────────────────────────────────────────────────────────

#[test]
fn rectangular_wing_emits_four_triangles() {
    let (mut doc, key) = document_with(rectangular_wing(one_section()));
    let mut triangles: Vec<Triangle> = Vec::new();
    let n = doc.render_wing(key, &mut triangles).unwrap();
    assert_eq!(n, 4);
    assert_eq!(triangles.len(), 4);

    let top = triangles
        .iter()
        .flat_map(|t| t.vertices)
        .map(|p| p.z)
        .fold(f64::MIN, f64::max);
    assert_abs_diff_eq!(top, 0.6, epsilon = 1e-9);
}

#[test]
fn rendering_validates_the_cache() {
    let (mut doc, key) = document_with(rectangular_wing(one_section()));
    assert_eq!(doc.wing(key).unwrap().cache_state(), CacheState::Unset);
    let mut mesh = TriangleMesh::new();
    doc.render_wing(key, &mut mesh).unwrap();
    assert_eq!(doc.wing(key).unwrap().cache_state(), CacheState::Valid);
    assert_eq!(mesh.triangle_count(), 4);
}

#[test]
fn every_shape_setter_invalidates() {
    let (mut doc, key) = document_with(rectangular_wing(one_section()));
    let sketches = doc.sketches().clone();

    let setters: Vec<fn(&mut Wing)> = vec![
        |w| w.set_mirror(true),
        |w| w.set_sketch(CurveSlot::AngleGraph, Some(SketchId(ANGLE))),
        |w| w.set_num_sections(3).unwrap(),
        |w| w.set_num_profile_points(5).unwrap(),
        |w| w.set_mode(GenerationMode::default()),
    ];
    for setter in setters {
        let wing = doc.wing_mut(key).unwrap();
        wing.set_mode(one_section());
        wing.ensure_derived(&sketches);
        assert_eq!(wing.cache_state(), CacheState::Valid);
        setter(wing);
        assert_eq!(wing.cache_state(), CacheState::Unset);
    }

    let wing = doc.wing_mut(key).unwrap();
    wing.ensure_derived(&sketches);
    wing.set_centre_straight(false).unwrap();
    assert_eq!(wing.cache_state(), CacheState::Unset);
}

#[test]
fn color_keeps_the_cache() {
    let (mut doc, key) = document_with(rectangular_wing(one_section()));
    doc.bounding_box(key).unwrap();
    let wing = doc.wing_mut(key).unwrap();
    wing.set_color(Color::new(255, 0, 0));
    assert_eq!(wing.cache_state(), CacheState::Valid);
}

#[test]
fn sketch_edit_invalidates_dependent_wings() {
    let (mut doc, key) = document_with(rectangular_wing(one_section()));
    let other = doc.add_wing("empty", Wing::new());
    doc.bounding_box(key).unwrap();
    doc.bounding_box(other).unwrap();

    doc.insert_sketch(Sketch::new(TRAILING, "trailing", vec![[0.0, -3.0], [10.0, -3.0]]));
    assert_eq!(doc.wing(key).unwrap().cache_state(), CacheState::Unset);
    assert_eq!(doc.wing(other).unwrap().cache_state(), CacheState::Valid);

    let bb = doc.bounding_box(key).unwrap().unwrap();
    assert_abs_diff_eq!(bb.min.y, -3.0, epsilon = 1e-12);
}

#[test]
fn bounding_box_is_union_of_curves_at_zero_height() {
    let (mut doc, key) = document_with(rectangular_wing(one_section()));
    let bb = doc.bounding_box(key).unwrap().unwrap();
    assert_eq!(bb.to_array(), [0.0, -2.0, 0.0, 10.0, 0.3, 0.0]);
}

#[test]
fn wing_without_curves_has_no_box_and_no_triangles() {
    let (mut doc, _) = document_with(rectangular_wing(one_section()));
    let key = doc.add_wing("blank", Wing::new());
    assert_eq!(doc.bounding_box(key).unwrap(), None);
    let mut triangles: Vec<Triangle> = Vec::new();
    assert_eq!(doc.render_wing(key, &mut triangles).unwrap(), 0);
}

#[test]
fn reversed_sketch_is_oriented_leftmost_first() {
    let (mut doc, key) = document_with(rectangular_wing(one_section()));
    doc.insert_sketch(Sketch::new(LEADING, "leading", vec![[10.0, 0.0], [0.0, 0.0]]));
    let mut triangles: Vec<Triangle> = Vec::new();
    doc.render_wing(key, &mut triangles).unwrap();
    // Root section still sits at x = 0.
    assert_abs_diff_eq!(triangles[0].vertices[0].x, 0.0, epsilon = 1e-9);
}

#[test]
fn mirror_doubles_through_properties() {
    let (mut doc, key) = document_with(rectangular_wing(one_section()));
    doc.set_property(key, "mirror", ConfigValue::Bool(true)).unwrap();
    let mut triangles: Vec<Triangle> = Vec::new();
    assert_eq!(doc.render_wing(key, &mut triangles).unwrap(), 8);
    assert!(triangles[2].vertices.iter().all(|p| p.x <= 0.0));
}

#[test]
fn sketch_span_mode_follows_trailing_vertices() {
    let mut wing = rectangular_wing(GenerationMode::SketchSpans {
        centre_straight: true,
    });
    wing.set_sketch(CurveSlot::TrailingEdge, Some(SketchId(9)));
    let (mut doc, key) = document_with(wing);
    doc.insert_sketch(Sketch::new(
        9,
        "kinked",
        vec![[0.0, -2.0], [4.0, -2.0], [10.0, -1.0]],
    ));
    let mut triangles: Vec<Triangle> = Vec::new();
    // Two spans, two quads per span.
    assert_eq!(doc.render_wing(key, &mut triangles).unwrap(), 8);
}

#[test]
fn twist_tilts_the_tip_section() {
    let mut wing = rectangular_wing(one_section());
    wing.set_sketch(CurveSlot::AngleGraph, Some(SketchId(ANGLE)));
    let (mut doc, key) = document_with(wing);
    let mut triangles: Vec<Triangle> = Vec::new();
    doc.render_wing(key, &mut triangles).unwrap();

    // A 5 degree twist at the tip raises the crest above the untwisted 0.6.
    let tip_crest = triangles
        .iter()
        .flat_map(|t| t.vertices)
        .filter(|p| (p.x - 10.0).abs() < 1e-9)
        .map(|p| p.z)
        .fold(f64::MIN, f64::max);
    assert!(tip_crest > 0.6);
}

#[test]
fn properties_follow_mode() {
    let (mut doc, key) = document_with(rectangular_wing(GenerationMode::default()));
    assert!(doc
        .set_property(key, "num_sections", ConfigValue::Int(4))
        .is_err());
    doc.set_property(key, "centre_straight", ConfigValue::Bool(false))
        .unwrap();
    assert_eq!(
        doc.get_property(key, "centre_straight").unwrap(),
        ConfigValue::Bool(false)
    );
    assert_eq!(
        doc.get_property(key, "LeadingEdge").unwrap(),
        ConfigValue::Int(LEADING as i64)
    );
}

#[test]
fn removed_wing_is_not_found() {
    let (mut doc, key) = document_with(Wing::new());
    let entry = doc.remove_wing(key).unwrap();
    assert_eq!(entry.name, "main wing");
    assert_eq!(doc.find_by_id(entry.id), None);
    assert!(matches!(
        doc.remove_wing(key),
        Err(EngineError::WingNotFound { .. })
    ));
    let mut triangles: Vec<Triangle> = Vec::new();
    assert!(doc.render_wing(key, &mut triangles).is_err());
}
