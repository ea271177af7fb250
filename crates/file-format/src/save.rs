use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wing_engine::WingDocument;
use wing_types::Sketch;

use crate::keyvalue::write_wing;
use crate::metadata::ProjectMetadata;

/// Current file format version.
pub const FORMAT_VERSION: u32 = 1;

/// Format identifier written at the top of every project file.
pub const FORMAT_NAME: &str = "wing-designer";

/// One wing as stored on disk: identity plus its key-value fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WingRecord {
    pub id: Uuid,
    pub name: String,
    pub fields: BTreeMap<String, String>,
}

/// The top-level file structure.
#[derive(Debug, Clone, Serialize)]
pub struct WingFile {
    /// Format identifier.
    pub format: String,
    /// Format version number.
    pub version: u32,
    /// Project metadata.
    pub project: ProjectMetadata,
    /// Polylines the wings are lofted from.
    pub sketches: Vec<Sketch>,
    pub wings: Vec<WingRecord>,
}

/// The on-disk record of every wing in `doc`, in insertion order.
pub fn wing_records(doc: &WingDocument) -> Vec<WingRecord> {
    doc.wings()
        .map(|(_, entry)| {
            let mut fields: BTreeMap<String, String> = BTreeMap::new();
            write_wing(entry.wing.config(), &mut fields);
            WingRecord {
                id: entry.id,
                name: entry.name.clone(),
                fields,
            }
        })
        .collect()
}

/// Serialize a project to a pretty-printed JSON string.
pub fn save_project(doc: &WingDocument, metadata: &ProjectMetadata) -> String {
    let file = WingFile {
        format: FORMAT_NAME.to_string(),
        version: FORMAT_VERSION,
        project: metadata.clone(),
        sketches: doc.sketches().iter().cloned().collect(),
        wings: wing_records(doc),
    };
    serde_json::to_string_pretty(&file).expect("project serialization should never fail")
}
