//! Named, typed access to wing settings for property editors.

use wing_types::{ConfigValue, CurveSlot, GenerationMode, PropertyKind, SketchId};

use crate::types::PropertyError;
use crate::wing::{mode_name, Wing};

/// One editable wing property.
#[derive(Clone, Copy)]
pub struct PropertyDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub kind: PropertyKind,
    /// Whether the property applies to a wing in the given mode.
    pub available: fn(&GenerationMode) -> bool,
    pub get: fn(&Wing) -> ConfigValue,
    /// Called with a value already checked against `kind`.
    pub set: fn(&mut Wing, ConfigValue) -> Result<(), PropertyError>,
}

impl std::fmt::Debug for PropertyDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// The property table of an application.
#[derive(Debug, Clone, Default)]
pub struct PropertyRegistry {
    descriptors: Vec<PropertyDescriptor>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every wing property.
    pub fn with_wing_properties() -> Self {
        let mut registry = Self::new();
        for descriptor in wing_properties() {
            registry.register(descriptor);
        }
        registry
    }

    /// Add a descriptor, replacing any with the same name.
    pub fn register(&mut self, descriptor: PropertyDescriptor) {
        match self.descriptors.iter_mut().find(|d| d.name == descriptor.name) {
            Some(slot) => *slot = descriptor,
            None => self.descriptors.push(descriptor),
        }
    }

    pub fn find(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    /// Descriptors that apply to `wing` in its current mode, in table order.
    pub fn visible<'a>(&'a self, wing: &'a Wing) -> impl Iterator<Item = &'a PropertyDescriptor> + 'a {
        let mode = wing.mode();
        self.descriptors.iter().filter(move |d| (d.available)(&mode))
    }

    pub fn get(&self, wing: &Wing, name: &str) -> Result<ConfigValue, PropertyError> {
        let descriptor = self.lookup(wing, name)?;
        Ok((descriptor.get)(wing))
    }

    pub fn set(&self, wing: &mut Wing, name: &str, value: ConfigValue) -> Result<(), PropertyError> {
        let descriptor = self.lookup(wing, name)?;
        if value.kind() != descriptor.kind {
            return Err(PropertyError::WrongKind {
                name: name.to_string(),
                expected: descriptor.kind,
                found: value.kind(),
            });
        }
        (descriptor.set)(wing, value)
    }

    fn lookup(&self, wing: &Wing, name: &str) -> Result<&PropertyDescriptor, PropertyError> {
        let descriptor = self.find(name).ok_or_else(|| PropertyError::Unknown {
            name: name.to_string(),
        })?;
        let mode = wing.mode();
        if !(descriptor.available)(&mode) {
            return Err(PropertyError::NotAvailable {
                name: name.to_string(),
                mode: mode_name(&mode),
            });
        }
        Ok(descriptor)
    }
}

// ── Wing property table ─────────────────────────────────────────────────

fn always(_: &GenerationMode) -> bool {
    true
}

fn sketch_spans(mode: &GenerationMode) -> bool {
    matches!(mode, GenerationMode::SketchSpans { .. })
}

fn fixed_counts(mode: &GenerationMode) -> bool {
    matches!(mode, GenerationMode::FixedCounts { .. })
}

fn int_value(name: &str, value: &ConfigValue) -> Result<i64, PropertyError> {
    value.as_int().ok_or_else(|| PropertyError::WrongKind {
        name: name.to_string(),
        expected: PropertyKind::Int,
        found: value.kind(),
    })
}

fn bool_value(name: &str, value: &ConfigValue) -> Result<bool, PropertyError> {
    value.as_bool().ok_or_else(|| PropertyError::WrongKind {
        name: name.to_string(),
        expected: PropertyKind::Bool,
        found: value.kind(),
    })
}

fn count_value(name: &str, value: &ConfigValue) -> Result<u32, PropertyError> {
    let raw = int_value(name, value)?;
    u32::try_from(raw).map_err(|_| PropertyError::OutOfRange {
        name: name.to_string(),
        value: raw,
    })
}

fn get_sketch<const SLOT: usize>(wing: &Wing) -> ConfigValue {
    let id = wing.sketch(CurveSlot::ALL[SLOT]);
    ConfigValue::Int(SketchId::to_stored(id) as i64)
}

fn set_sketch<const SLOT: usize>(wing: &mut Wing, value: ConfigValue) -> Result<(), PropertyError> {
    let slot = CurveSlot::ALL[SLOT];
    let raw = count_value(slot.document_key(), &value)?;
    wing.set_sketch(slot, SketchId::from_stored(raw));
    Ok(())
}

fn sketch_property<const SLOT: usize>() -> PropertyDescriptor {
    let slot = CurveSlot::ALL[SLOT];
    PropertyDescriptor {
        name: slot.document_key(),
        title: slot.title(),
        kind: PropertyKind::Int,
        available: always,
        get: get_sketch::<SLOT>,
        set: set_sketch::<SLOT>,
    }
}

/// Every wing property in editor order.
pub fn wing_properties() -> Vec<PropertyDescriptor> {
    vec![
        sketch_property::<0>(),
        sketch_property::<1>(),
        sketch_property::<2>(),
        sketch_property::<3>(),
        sketch_property::<4>(),
        PropertyDescriptor {
            name: "mirror",
            title: "mirror",
            kind: PropertyKind::Bool,
            available: always,
            get: |wing| ConfigValue::Bool(wing.mirror()),
            set: |wing, value| {
                wing.set_mirror(bool_value("mirror", &value)?);
                Ok(())
            },
        },
        PropertyDescriptor {
            name: "centre_straight",
            title: "centre straight",
            kind: PropertyKind::Bool,
            available: sketch_spans,
            get: |wing| match wing.mode() {
                GenerationMode::SketchSpans { centre_straight } => ConfigValue::Bool(centre_straight),
                GenerationMode::FixedCounts { .. } => ConfigValue::Bool(false),
            },
            set: |wing, value| wing.set_centre_straight(bool_value("centre_straight", &value)?),
        },
        PropertyDescriptor {
            name: "num_sections",
            title: "number of sections",
            kind: PropertyKind::Int,
            available: fixed_counts,
            get: |wing| match wing.mode() {
                GenerationMode::FixedCounts { num_sections, .. } => {
                    ConfigValue::Int(num_sections as i64)
                }
                GenerationMode::SketchSpans { .. } => ConfigValue::Int(0),
            },
            set: |wing, value| wing.set_num_sections(count_value("num_sections", &value)?),
        },
        PropertyDescriptor {
            name: "num_profile_points",
            title: "number of profile points",
            kind: PropertyKind::Int,
            available: fixed_counts,
            get: |wing| match wing.mode() {
                GenerationMode::FixedCounts {
                    num_profile_points, ..
                } => ConfigValue::Int(num_profile_points as i64),
                GenerationMode::SketchSpans { .. } => ConfigValue::Int(0),
            },
            set: |wing, value| {
                wing.set_num_profile_points(count_value("num_profile_points", &value)?)
            },
        },
    ]
}
