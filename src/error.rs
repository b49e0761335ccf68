//! Error types for the broadening core.

use thiserror::Error;

/// Errors raised while validating broadening input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BroadenError {
    /// The caller passed input the kernels cannot handle
    /// (empty peak list, non-positive width, zero resolution, NaN values).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl BroadenError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        BroadenError::InvalidArgument(msg.into())
    }
}
