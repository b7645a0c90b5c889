//! Schema registry error types.

use tender_core::errors::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name was not found in the registry.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// JSON value did not pass schema validation.
    #[error("Validation failed: {errors:?}")]
    ValidationFailed { errors: Vec<String> },

    /// Schema compilation error.
    #[error("Schema generation error: {0}")]
    Generation(String),
}

impl SchemaError {
    /// A record failing its schema is a validation problem; anything else is
    /// a programming error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationFailed { .. } => ErrorKind::Validation,
            Self::NotFound(_) | Self::Generation(_) => ErrorKind::Internal,
        }
    }
}
