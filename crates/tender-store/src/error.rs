//! Store error types for tender-store.

use tender_core::errors::{ErrorKind, ValidationError};
use tender_docs::{AssembleError, RenderError};
use thiserror::Error;

/// Errors from record storage and the repositories on top of it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record is missing or owned by another contractor.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A create would replace an existing record.
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: String, id: String },

    /// Input failed a field check. Nothing was written.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Reading or writing a record file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored document does not parse as the record it should hold.
    #[error("Corrupt record at {path}: {reason}")]
    Corrupt { path: String, reason: String },

    #[error(transparent)]
    Assemble(#[from] AssembleError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(field, message))
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation(_) | Self::Assemble(_) => ErrorKind::Validation,
            Self::Io { .. }
            | Self::Serialization(_)
            | Self::Corrupt { .. }
            | Self::AlreadyExists { .. } => ErrorKind::Storage,
            Self::Render(e) => e.kind(),
            Self::Other(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_the_taxonomy() {
        assert_eq!(StoreError::not_found("pack", "pck-1").kind(), ErrorKind::NotFound);
        assert_eq!(StoreError::invalid("title", "required").kind(), ErrorKind::Validation);
        let io = StoreError::io("a.json", std::io::Error::other("disk full"));
        assert_eq!(io.kind(), ErrorKind::Storage);
        let assemble: StoreError = AssembleError::UnknownItem { item_id: "x".into() }.into();
        assert_eq!(assemble.kind(), ErrorKind::Validation);
    }
}
