use serde::{Deserialize, Serialize};
use std::fmt;

use crate::sketch::SketchId;
use crate::slots::CurveSlot;

/// An RGB display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const GREY: Self = Self {
        r: 128,
        g: 128,
        b: 128,
    };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as `r | g << 8 | b << 16`, the integer form stored in documents.
    pub fn packed(&self) -> u32 {
        self.r as u32 | (self.g as u32) << 8 | (self.b as u32) << 16
    }

    pub fn from_packed(value: u32) -> Self {
        Self {
            r: (value & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: ((value >> 16) & 0xff) as u8,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::GREY
    }
}

/// The kind of value a property holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyKind {
    Bool,
    Int,
    Float,
    String,
}

/// A typed configuration value exchanged with property editors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum ConfigValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl ConfigValue {
    pub fn kind(&self) -> PropertyKind {
        match self {
            ConfigValue::Bool(_) => PropertyKind::Bool,
            ConfigValue::Int(_) => PropertyKind::Int,
            ConfigValue::Float(_) => PropertyKind::Float,
            ConfigValue::String(_) => PropertyKind::String,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{b}"),
            ConfigValue::Int(i) => write!(f, "{i}"),
            ConfigValue::Float(x) => write!(f, "{x}"),
            ConfigValue::String(s) => write!(f, "{s}"),
        }
    }
}

/// How section stations and profile samples are chosen.
///
/// The two modes come from two generations of the wing tool and persist
/// different fields, so they are kept apart rather than merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum GenerationMode {
    /// One section pair per trailing-edge span; profile points follow the
    /// root profile's own vertices.
    SketchSpans {
        /// Force the centreline section to a straight unit chord.
        centre_straight: bool,
    },
    /// Evenly spaced sections and profile samples.
    FixedCounts {
        num_sections: u32,
        num_profile_points: u32,
    },
}

impl Default for GenerationMode {
    fn default() -> Self {
        GenerationMode::SketchSpans {
            centre_straight: true,
        }
    }
}

/// Persistent configuration of a wing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WingConfig {
    pub color: Color,
    /// Sketch per curve slot, indexed by [`CurveSlot::index`].
    pub sketches: [Option<SketchId>; 5],
    /// Also emit the x-negated half.
    pub mirror: bool,
    pub mode: GenerationMode,
}

impl WingConfig {
    pub fn sketch(&self, slot: CurveSlot) -> Option<SketchId> {
        self.sketches[slot.index()]
    }

    pub fn set_sketch(&mut self, slot: CurveSlot, sketch: Option<SketchId>) {
        self.sketches[slot.index()] = sketch;
    }
}

impl Default for WingConfig {
    fn default() -> Self {
        Self {
            color: Color::default(),
            sketches: [None; 5],
            mirror: false,
            mode: GenerationMode::default(),
        }
    }
}
