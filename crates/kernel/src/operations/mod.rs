pub mod loft;
pub mod profile;
pub mod section;

/// Structured error type for kernel inputs that cannot be represented.
///
/// Missing or degenerate geometry is not an error in this crate: the
/// builders return `None` or fall back to flat sections instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OperationError {
    /// A vertex coordinate was NaN or infinite.
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex { index: usize },
}
