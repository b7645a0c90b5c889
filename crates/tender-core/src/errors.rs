//! Cross-cutting error types.
//!
//! Domain errors (`StoreError`, `FillError`, `ExtractionError`, ...) live in
//! their own crates. Every one of them maps onto [`ErrorKind`] so the command
//! boundary can decide how a failure is surfaced to the contractor.

use std::fmt;

use thiserror::Error;

/// The four user-facing failure classes plus a catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// User input failed a format/length/enum check. Shown inline, never persisted.
    Validation,
    /// Record is missing or owned by a different contractor.
    NotFound,
    /// AI extraction (or another remote collaborator) failed or returned garbage.
    ExternalService,
    /// A read or write against the record store failed.
    Storage,
    /// Anything else; rendered as a generic failure.
    Internal,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::ExternalService => "external_service",
            Self::Storage => "storage",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Form field (or placeholder key) the message belongs to.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors that can be raised by any crate in the workspace.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result (or belongs to someone else).
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (format, length, enum).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Other(_) => ErrorKind::Internal,
        }
    }
}
