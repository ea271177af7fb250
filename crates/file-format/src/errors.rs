/// Errors during project file or key-value document loading.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("failed to parse file: {0}")]
    ParseError(String),

    #[error("unknown file format: {0}")]
    UnknownFormat(String),

    #[error("file version {file_version} is newer than supported version {supported_version}")]
    FutureVersion {
        file_version: u32,
        supported_version: u32,
    },

    #[error("migration failed from version {from} to {to}: {reason}")]
    MigrationFailed { from: u32, to: u32, reason: String },

    #[error("missing key: {key}")]
    MissingKey { key: String },

    #[error("invalid value {value:?} for key {key}")]
    InvalidValue { key: String, value: String },
}

/// Errors during mesh export.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExportError {
    #[error("wing not found: {0}")]
    WingNotFound(String),

    #[error("wing {0} produced no triangles")]
    NoTriangles(String),
}
