use thiserror::Error;

/// Errors surfaced by value capabilities.
///
/// Rendering itself never fails; the formatter discards a failing
/// [`DriverValue`](crate::DriverValue) accessor and falls back to the null
/// literal. The type exists so capability implementations have a concrete
/// error channel.
#[derive(Debug, Error)]
pub enum ExplainError {
    /// A driver-value accessor could not reveal its canonical representation.
    #[error("driver value error: {0}")]
    DriverValue(String),

    /// A value could not be expressed in any representable form.
    #[error("unsupported value: {0}")]
    Unsupported(String),
}

/// Result type for value capability implementations.
pub type Result<T> = std::result::Result<T, ExplainError>;
