//! Error types for the mabe library.

use thiserror::Error;

/// Result type alias for bandit operations.
pub type Result<T> = std::result::Result<T, BanditError>;

/// Errors that can occur during bandit operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BanditError {
    /// No arms are available in the bandit.
    #[error("no arms available")]
    NoArmsAvailable,

    /// The specified arm was not found in the bandit.
    #[error("arm not found")]
    ArmNotFound,

    /// The specified arm already exists in the bandit.
    #[error("arm already exists")]
    ArmAlreadyExists,

    /// An arm index outside `[0, n_arms)`.
    #[error("arm index {arm} out of range for {n_arms} arms")]
    ArmOutOfRange { arm: usize, n_arms: usize },

    /// Mismatch in the dimensions of input data.
    #[error("dimension mismatch: {message}")]
    DimensionMismatch { message: String },

    /// Invalid parameter value.
    #[error("invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// A contextual policy was called without a context.
    #[error("policy requires context")]
    ContextRequired,

    /// Invalid context dimensions.
    #[error("invalid context dimensions: expected {expected}, got {got}")]
    InvalidContextDimensions { expected: usize, got: usize },

    /// Numerical computation error.
    #[error("numerical error: {message}")]
    NumericalError { message: String },
}
