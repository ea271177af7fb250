pub mod errors;
pub mod keyvalue;
pub mod load;
pub mod mesh_export;
pub mod metadata;
pub mod migrate;
pub mod save;

pub use errors::{ExportError, LoadError};
pub use keyvalue::{read_wing, write_wing, KeyValueDocument};
pub use load::load_project;
pub use mesh_export::{export_wing_mesh, export_wing_obj, export_wing_stl};
pub use metadata::ProjectMetadata;
pub use save::{save_project, WingRecord, FORMAT_NAME, FORMAT_VERSION};
