//! Pipeline error types.
//!
//! Resolution and substitution never fail; only assembly (bad references)
//! and rendering can.

use tender_core::errors::{ErrorKind, ValidationError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssembleError {
    /// An attachment mapping or status change names an item the pack lacks.
    #[error("unknown checklist item '{item_id}'")]
    UnknownItem { item_id: String },

    /// A mapping names a vault file the contractor does not have.
    #[error("unknown vault file '{file_id}'")]
    UnknownFile { file_id: String },

    /// A mapping names a soft-deleted vault file.
    #[error("vault file '{file_id}' has been deleted")]
    DeletedFile { file_id: String },
}

impl AssembleError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }

    /// Field-level form message for this failure.
    #[must_use]
    pub fn to_validation(&self) -> ValidationError {
        let field = match self {
            Self::UnknownItem { .. } => "item_id",
            Self::UnknownFile { .. } | Self::DeletedFile { .. } => "file_id",
        };
        ValidationError::new(field, self.to_string())
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    /// The renderer cannot produce the requested output.
    #[error("renderer does not support {0}")]
    Unsupported(String),

    /// The external rendering collaborator failed.
    #[error("rendering failed: {0}")]
    Failed(String),
}

impl RenderError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unsupported(_) => ErrorKind::Internal,
            Self::Failed(_) => ErrorKind::ExternalService,
        }
    }
}
