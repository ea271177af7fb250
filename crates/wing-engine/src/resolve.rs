use std::collections::{BTreeMap, HashMap};

use tracing::warn;
use wing_kernel::Curve;
use wing_types::{Sketch, SketchId};

/// Source of the planar curves a wing refers to by sketch id.
pub trait CurveResolver {
    /// The polyline drawn by sketch `id`, or `None` if it does not exist.
    fn resolve(&self, id: SketchId) -> Option<Curve>;
}

impl CurveResolver for HashMap<SketchId, Curve> {
    fn resolve(&self, id: SketchId) -> Option<Curve> {
        self.get(&id).cloned()
    }
}

/// Sketches held as plain polylines, keyed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SketchLibrary {
    sketches: BTreeMap<SketchId, Sketch>,
}

impl SketchLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a sketch. Returns the sketch previously stored
    /// under the same id.
    pub fn insert(&mut self, sketch: Sketch) -> Option<Sketch> {
        self.sketches.insert(sketch.id, sketch)
    }

    pub fn remove(&mut self, id: SketchId) -> Option<Sketch> {
        self.sketches.remove(&id)
    }

    pub fn get(&self, id: SketchId) -> Option<&Sketch> {
        self.sketches.get(&id)
    }

    /// Sketches in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Sketch> {
        self.sketches.values()
    }

    pub fn len(&self) -> usize {
        self.sketches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sketches.is_empty()
    }

    /// Smallest id not yet used, never zero.
    pub fn next_id(&self) -> SketchId {
        let last = self.sketches.keys().next_back().map_or(0, |id| id.0);
        SketchId(last + 1)
    }
}

impl FromIterator<Sketch> for SketchLibrary {
    fn from_iter<I: IntoIterator<Item = Sketch>>(iter: I) -> Self {
        let mut library = Self::new();
        for sketch in iter {
            library.insert(sketch);
        }
        library
    }
}

impl CurveResolver for SketchLibrary {
    fn resolve(&self, id: SketchId) -> Option<Curve> {
        let sketch = self.sketches.get(&id)?;
        match Curve::try_from_coords(&sketch.points) {
            Ok(curve) => Some(curve),
            Err(err) => {
                warn!(sketch = %id, %err, "sketch rejected");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_polyline() {
        let library: SketchLibrary =
            [Sketch::new(3, "edge", vec![[0.0, 0.0], [2.0, 1.0]])].into_iter().collect();
        let curve = library.resolve(SketchId(3)).unwrap();
        assert_eq!(curve.num_vertices(), 2);
        assert!(library.resolve(SketchId(4)).is_none());
    }

    #[test]
    fn test_non_finite_sketch_does_not_resolve() {
        let mut library = SketchLibrary::new();
        library.insert(Sketch::new(1, "bad", vec![[0.0, 0.0], [f64::NAN, 1.0]]));
        assert!(library.resolve(SketchId(1)).is_none());
    }

    #[test]
    fn test_next_id_skips_used() {
        let mut library = SketchLibrary::new();
        assert_eq!(library.next_id(), SketchId(1));
        library.insert(Sketch::new(7, "", vec![]));
        assert_eq!(library.next_id(), SketchId(8));
    }
}
