use serde::{Deserialize, Serialize};
use wing_kernel::geometry::bounds::Box3d;
use wing_kernel::operations::profile::ProfileFrame;
use wing_kernel::operations::section::WingCurves;
use wing_types::PropertyKind;

use crate::WingKey;

/// Geometry derived from a wing's configuration and the current sketches.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedState {
    /// Resolved curves, each oriented leftmost-first.
    pub curves: WingCurves,
    pub root_frame: Option<ProfileFrame>,
    pub tip_frame: Option<ProfileFrame>,
    /// Union of the curve boxes at z = 0. `None` when no curve resolved.
    pub bounds: Option<Box3d>,
}

/// Lazily rebuilt derived state of a wing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DerivedCache {
    /// Curves must be resolved before use.
    #[default]
    Unset,
    /// A rebuild is in progress.
    Computing,
    Valid(DerivedState),
}

/// Observable phase of a [`DerivedCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheState {
    Unset,
    Computing,
    Valid,
}

impl DerivedCache {
    pub fn state(&self) -> CacheState {
        match self {
            DerivedCache::Unset => CacheState::Unset,
            DerivedCache::Computing => CacheState::Computing,
            DerivedCache::Valid(_) => CacheState::Valid,
        }
    }
}

/// Errors from reading or writing wing properties.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropertyError {
    #[error("unknown property: {name}")]
    Unknown { name: String },

    #[error("property {name} expects a {expected:?} value, got {found:?}")]
    WrongKind {
        name: String,
        expected: PropertyKind,
        found: PropertyKind,
    },

    #[error("value {value} is out of range for property {name}")]
    OutOfRange { name: String, value: i64 },

    #[error("property {name} is not available in {mode} mode")]
    NotAvailable { name: String, mode: &'static str },
}

/// Errors from the wing document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("wing not found: {key:?}")]
    WingNotFound { key: WingKey },

    #[error("property error: {0}")]
    Property(#[from] PropertyError),
}
