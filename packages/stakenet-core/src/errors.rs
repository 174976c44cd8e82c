//! Error types for stakenet-core
//!
//! Provides unified error handling across the crate.

use thiserror::Error;

/// Main error type for stakenet-core operations
#[derive(Debug, Error)]
pub enum CoreError {
    /// Design-matrix shape or column error
    #[error("Matrix error: {0}")]
    Matrix(String),

    /// Effect-estimation error (structural, never a missing coefficient)
    #[error("Effects error: {0}")]
    Effects(String),
}

impl CoreError {
    /// Create a matrix error
    pub fn matrix(msg: impl Into<String>) -> Self {
        CoreError::Matrix(msg.into())
    }

    /// Create an effects error
    pub fn effects(msg: impl Into<String>) -> Self {
        CoreError::Effects(msg.into())
    }
}

/// Result type alias for stakenet-core operations
pub type Result<T> = std::result::Result<T, CoreError>;
