//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use sharkmail_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Domain not found
    #[error("Domain not found: {0}")]
    DomainNotFound(String),

    /// Domain already registered for this account
    #[error("Domain already exists: {0}")]
    DomainExists(String),

    /// Input failed validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Operation ordering requirement not met
    #[error("{0}")]
    PreconditionFailed(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Provider error (converted from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether this is expected behavior (user input, missing resource) for
    /// log-level selection.
    ///
    /// Log at `warn` when `true`, `error` when `false`.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::DomainNotFound(_)
            | Self::DomainExists(_)
            | Self::ValidationError(_)
            | Self::PreconditionFailed(_) => true,
            Self::Provider(e) => e.is_expected(),
            _ => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
