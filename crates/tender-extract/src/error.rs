use tender_core::errors::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    /// `extraction.base_url` or `extraction.model` is not set.
    #[error("extraction service is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The call did not succeed; the collaborator's messages are attached.
    #[error("extraction failed: {}", errors.join("; "))]
    Failed { errors: Vec<String> },

    #[error("reply is not valid JSON: {reason}")]
    NotJson { reason: String },

    #[error("reply is JSON but not an object")]
    NotObject,

    /// A JSON object that names none of the expected fields.
    #[error("reply contains no tender fields")]
    NoFields,
}

impl ExtractionError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::ExternalService
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_lists_every_message() {
        let err = ExtractionError::Failed {
            errors: vec!["timeout".into(), "retry later".into()],
        };
        assert_eq!(err.to_string(), "extraction failed: timeout; retry later");
        assert_eq!(err.kind(), ErrorKind::ExternalService);
    }
}
