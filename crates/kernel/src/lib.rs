pub mod geometry;
pub mod operations;

// Re-export the types most callers need at crate root.
pub use geometry::curve::Curve;
pub use geometry::point::{Point2d, Point3d};
pub use operations::OperationError;
pub use operations::loft::{Triangle, TriangleSink};

/// Tolerances used by the wing geometry pipeline.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Points closer than this are considered coincident.
    pub coincidence: f64,
    /// Profiles whose chord is shorter than this are treated as degenerate.
    pub chord: f64,
    /// Relative slack allowed when sampling at the very end of a curve.
    pub parametric: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            coincidence: 1e-9,
            chord: 1e-5,
            parametric: 1e-9,
        }
    }
}

impl Tolerance {
    pub fn is_zero_length(&self, length: f64) -> bool {
        length.abs() < self.coincidence
    }

    pub fn is_degenerate_chord(&self, chord: f64) -> bool {
        chord < self.chord
    }
}

/// Default tolerance for kernel operations.
pub fn default_tolerance() -> Tolerance {
    Tolerance::default()
}
