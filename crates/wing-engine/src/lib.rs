pub mod properties;
pub mod resolve;
pub mod types;
pub mod wing;

use slotmap::{new_key_type, SlotMap};
use tracing::{debug, instrument};
use uuid::Uuid;
use wing_kernel::geometry::bounds::Box3d;
use wing_kernel::TriangleSink;
use wing_types::{ConfigValue, Sketch, SketchId};

pub use properties::{PropertyDescriptor, PropertyRegistry};
pub use resolve::{CurveResolver, SketchLibrary};
pub use types::{CacheState, DerivedCache, DerivedState, EngineError, PropertyError};
pub use wing::Wing;

new_key_type! {
    pub struct WingKey;
}

/// A wing together with its document identity.
#[derive(Debug, Clone)]
pub struct WingEntry {
    pub id: Uuid,
    pub name: String,
    pub wing: Wing,
}

/// A set of wings and the sketches they are lofted from.
///
/// Owns the property registry, so there is no process-wide table.
#[derive(Debug, Clone)]
pub struct WingDocument {
    sketches: SketchLibrary,
    wings: SlotMap<WingKey, WingEntry>,
    registry: PropertyRegistry,
}

impl WingDocument {
    pub fn new() -> Self {
        Self {
            sketches: SketchLibrary::new(),
            wings: SlotMap::with_key(),
            registry: PropertyRegistry::with_wing_properties(),
        }
    }

    pub fn sketches(&self) -> &SketchLibrary {
        &self.sketches
    }

    pub fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }

    /// Insert or replace a sketch. Wings drawn from it are invalidated.
    pub fn insert_sketch(&mut self, sketch: Sketch) {
        let id = sketch.id;
        self.sketches.insert(sketch);
        self.invalidate_users(id);
    }

    /// Remove a sketch. Wings drawn from it are invalidated.
    pub fn remove_sketch(&mut self, id: SketchId) -> Option<Sketch> {
        let removed = self.sketches.remove(id);
        if removed.is_some() {
            self.invalidate_users(id);
        }
        removed
    }

    fn invalidate_users(&mut self, id: SketchId) {
        for entry in self.wings.values_mut() {
            if entry.wing.uses_sketch(id) {
                debug!(wing = %entry.id, sketch = %id, "invalidated by sketch change");
                entry.wing.invalidate();
            }
        }
    }

    /// Add a wing under a fresh id.
    pub fn add_wing(&mut self, name: impl Into<String>, wing: Wing) -> WingKey {
        self.insert_wing(Uuid::new_v4(), name, wing)
    }

    /// Add a wing under a known id.
    pub fn insert_wing(&mut self, id: Uuid, name: impl Into<String>, wing: Wing) -> WingKey {
        self.wings.insert(WingEntry {
            id,
            name: name.into(),
            wing,
        })
    }

    pub fn remove_wing(&mut self, key: WingKey) -> Result<WingEntry, EngineError> {
        self.wings.remove(key).ok_or(EngineError::WingNotFound { key })
    }

    pub fn entry(&self, key: WingKey) -> Option<&WingEntry> {
        self.wings.get(key)
    }

    pub fn wing(&self, key: WingKey) -> Option<&Wing> {
        self.wings.get(key).map(|e| &e.wing)
    }

    pub fn wing_mut(&mut self, key: WingKey) -> Option<&mut Wing> {
        self.wings.get_mut(key).map(|e| &mut e.wing)
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<WingKey> {
        self.wings.iter().find(|(_, e)| e.id == id).map(|(k, _)| k)
    }

    pub fn find_by_name(&self, name: &str) -> Option<WingKey> {
        self.wings.iter().find(|(_, e)| e.name == name).map(|(k, _)| k)
    }

    pub fn wings(&self) -> impl Iterator<Item = (WingKey, &WingEntry)> {
        self.wings.iter()
    }

    pub fn wing_count(&self) -> usize {
        self.wings.len()
    }

    pub fn get_property(&self, key: WingKey, name: &str) -> Result<ConfigValue, EngineError> {
        let wing = self.wing(key).ok_or(EngineError::WingNotFound { key })?;
        Ok(self.registry.get(wing, name)?)
    }

    pub fn set_property(
        &mut self,
        key: WingKey,
        name: &str,
        value: ConfigValue,
    ) -> Result<(), EngineError> {
        let entry = self
            .wings
            .get_mut(key)
            .ok_or(EngineError::WingNotFound { key })?;
        self.registry.set(&mut entry.wing, name, value)?;
        Ok(())
    }

    pub fn bounding_box(&mut self, key: WingKey) -> Result<Option<Box3d>, EngineError> {
        let entry = self
            .wings
            .get_mut(key)
            .ok_or(EngineError::WingNotFound { key })?;
        Ok(entry.wing.bounding_box(&self.sketches))
    }

    /// Loft one wing into `sink`.
    pub fn render_wing(
        &mut self,
        key: WingKey,
        sink: &mut dyn TriangleSink,
    ) -> Result<usize, EngineError> {
        let entry = self
            .wings
            .get_mut(key)
            .ok_or(EngineError::WingNotFound { key })?;
        Ok(entry.wing.render_triangles(&self.sketches, sink))
    }

    /// Loft every wing into `sink`. Returns the total triangle count.
    #[instrument(skip_all)]
    pub fn render_all(&mut self, sink: &mut dyn TriangleSink) -> usize {
        let mut emitted = 0;
        for entry in self.wings.values_mut() {
            emitted += entry.wing.render_triangles(&self.sketches, sink);
        }
        emitted
    }
}

impl Default for WingDocument {
    fn default() -> Self {
        Self::new()
    }
}
