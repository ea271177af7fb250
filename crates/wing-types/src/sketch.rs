use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to an external 2D sketch.
///
/// Sketch ids are positive integers assigned by the host drawing. Zero is
/// reserved for "no sketch" in stored documents and is never a valid id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SketchId(pub u32);

impl SketchId {
    /// Decode a stored id, mapping the reserved zero to `None`.
    pub fn from_stored(raw: u32) -> Option<Self> {
        if raw == 0 { None } else { Some(Self(raw)) }
    }

    /// Encode an optional id for storage (`None` becomes zero).
    pub fn to_stored(id: Option<Self>) -> u32 {
        id.map(|s| s.0).unwrap_or(0)
    }
}

impl fmt::Display for SketchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sketch#{}", self.0)
    }
}

/// A sketch reduced to the single open polyline the wing builder consumes.
///
/// The host drawing may hold arbitrary entities; by the time a sketch reaches
/// this crate it has been flattened into an ordered list of vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sketch {
    /// Identifier referenced by wing curve slots.
    pub id: SketchId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Polyline vertices in sketch coordinates.
    pub points: Vec<[f64; 2]>,
}

impl Sketch {
    pub fn new(id: u32, name: impl Into<String>, points: Vec<[f64; 2]>) -> Self {
        Self {
            id: SketchId(id),
            name: name.into(),
            points,
        }
    }
}
