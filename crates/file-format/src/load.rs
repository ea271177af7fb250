use serde::Deserialize;
use wing_engine::{Wing, WingDocument};
use wing_types::Sketch;

use crate::errors::LoadError;
use crate::keyvalue::read_wing;
use crate::metadata::ProjectMetadata;
use crate::save::{WingRecord, FORMAT_NAME, FORMAT_VERSION};

/// The top-level file structure for deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct WingFileRaw {
    pub format: String,
    pub version: u32,
    pub project: ProjectMetadata,
    #[serde(default)]
    pub sketches: Vec<Sketch>,
    #[serde(default)]
    pub wings: Vec<WingRecord>,
}

/// Deserialize a project from a JSON string.
///
/// Validates the format identifier and version, then rebuilds a
/// [`WingDocument`] with every wing's cache unset.
pub fn load_project(json: &str) -> Result<(WingDocument, ProjectMetadata), LoadError> {
    let raw: WingFileRaw =
        serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))?;

    if raw.format != FORMAT_NAME {
        return Err(LoadError::UnknownFormat(raw.format));
    }

    if raw.version > FORMAT_VERSION {
        return Err(LoadError::FutureVersion {
            file_version: raw.version,
            supported_version: FORMAT_VERSION,
        });
    }

    let wings = if raw.version < FORMAT_VERSION {
        crate::migrate::migrate(raw.wings, raw.version, FORMAT_VERSION)?
    } else {
        raw.wings
    };

    let mut doc = WingDocument::new();
    for sketch in raw.sketches {
        doc.insert_sketch(sketch);
    }
    for record in wings {
        let config = read_wing(&record.fields)?;
        doc.insert_wing(record.id, record.name, Wing::from_config(config));
    }

    Ok((doc, raw.project))
}
