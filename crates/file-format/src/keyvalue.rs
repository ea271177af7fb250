//! Wing settings as a flat map of named string values.
//!
//! This is the attribute layout a host document stores per wing object:
//! `col`, one key per curve slot, then the mode's own fields.

use std::collections::BTreeMap;

use wing_types::{Color, CurveSlot, GenerationMode, SketchId, WingConfig};

use crate::errors::LoadError;

pub const KEY_COLOR: &str = "col";
pub const KEY_MIRROR: &str = "mirror";
pub const KEY_CENTRE_STRAIGHT: &str = "centre_straight";
pub const KEY_NUM_SECTIONS: &str = "num_sections";
pub const KEY_NUM_PROFILE_POINTS: &str = "num_profile_points";

/// A store of one string value per key.
pub trait KeyValueDocument {
    fn set_value(&mut self, key: &str, value: String);
    fn get_value(&self, key: &str) -> Option<&str>;
}

impl KeyValueDocument for BTreeMap<String, String> {
    fn set_value(&mut self, key: &str, value: String) {
        self.insert(key.to_string(), value);
    }

    fn get_value(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

fn format_bool(value: bool) -> String {
    let s = if value { "True" } else { "False" };
    s.to_string()
}

/// Parse `True`/`False` in any case, plus `1`/`0`.
pub fn parse_bool(key: &str, value: &str) -> Result<bool, LoadError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn invalid(key: &str, value: &str) -> LoadError {
    LoadError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_u32(key: &str, value: &str) -> Result<u32, LoadError> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

fn required<'a>(doc: &'a dyn KeyValueDocument, key: &str) -> Result<&'a str, LoadError> {
    doc.get_value(key).ok_or_else(|| LoadError::MissingKey {
        key: key.to_string(),
    })
}

fn optional_bool(doc: &dyn KeyValueDocument, key: &str, default: bool) -> Result<bool, LoadError> {
    match doc.get_value(key) {
        Some(s) if !s.is_empty() => parse_bool(key, s),
        _ => Ok(default),
    }
}

/// Write every field of `config` into `doc`.
pub fn write_wing(config: &WingConfig, doc: &mut dyn KeyValueDocument) {
    doc.set_value(KEY_COLOR, config.color.packed().to_string());
    for slot in CurveSlot::ALL {
        let stored = SketchId::to_stored(config.sketch(slot));
        doc.set_value(slot.document_key(), stored.to_string());
    }
    match config.mode {
        GenerationMode::SketchSpans { centre_straight } => {
            doc.set_value(KEY_MIRROR, format_bool(config.mirror));
            doc.set_value(KEY_CENTRE_STRAIGHT, format_bool(centre_straight));
        }
        GenerationMode::FixedCounts {
            num_sections,
            num_profile_points,
        } => {
            doc.set_value(KEY_NUM_SECTIONS, num_sections.to_string());
            doc.set_value(KEY_NUM_PROFILE_POINTS, num_profile_points.to_string());
            doc.set_value(KEY_MIRROR, format_bool(config.mirror));
        }
    }
}

/// Read a wing configuration back from `doc`.
///
/// Sketch keys are required; colour, mirror and centre-straight fall back
/// to their defaults when absent or empty. The presence of `num_sections`
/// selects fixed-count mode.
pub fn read_wing(doc: &dyn KeyValueDocument) -> Result<WingConfig, LoadError> {
    let mut config = WingConfig::default();

    if let Some(s) = doc.get_value(KEY_COLOR).filter(|s| !s.is_empty()) {
        config.color = Color::from_packed(parse_u32(KEY_COLOR, s)?);
    }

    for slot in CurveSlot::ALL {
        let key = slot.document_key();
        let raw = parse_u32(key, required(doc, key)?)?;
        config.set_sketch(slot, SketchId::from_stored(raw));
    }

    config.mirror = optional_bool(doc, KEY_MIRROR, false)?;
    config.mode = match doc.get_value(KEY_NUM_SECTIONS) {
        Some(sections) => GenerationMode::FixedCounts {
            num_sections: parse_u32(KEY_NUM_SECTIONS, sections)?,
            num_profile_points: parse_u32(
                KEY_NUM_PROFILE_POINTS,
                required(doc, KEY_NUM_PROFILE_POINTS)?,
            )?,
        },
        None => GenerationMode::SketchSpans {
            centre_straight: optional_bool(doc, KEY_CENTRE_STRAIGHT, true)?,
        },
    };

    Ok(config)
}
