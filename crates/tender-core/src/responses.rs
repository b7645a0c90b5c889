//! Response types returned by command handlers.
//!
//! Flash messages are one-shot values returned next to the data of a
//! response; nothing is stashed in ambient session state.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{ErrorKind, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A one-shot message shown with a single response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
    /// Form field the message belongs to, for inline validation messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
            field: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Warning,
            message: message.into(),
            field: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            message: message.into(),
            field: None,
        }
    }

    /// Inline message for a failed form field.
    #[must_use]
    pub fn from_validation(err: &ValidationError) -> Self {
        Self {
            level: FlashLevel::Error,
            message: err.message.clone(),
            field: Some(err.field.clone()),
        }
    }

    /// User-facing message for a failure of the given kind.
    ///
    /// Storage and internal failures get generic wording; the detail goes to
    /// the log only.
    #[must_use]
    pub fn for_error_kind(kind: ErrorKind) -> Self {
        let message = match kind {
            ErrorKind::Validation => "Some fields need attention.",
            ErrorKind::NotFound => "Not found.",
            ErrorKind::ExternalService => {
                "Automatic extraction is unavailable right now. Please try again."
            }
            ErrorKind::Storage => "Could not save your changes. Please try again later.",
            ErrorKind::Internal => "Something went wrong.",
        };
        Self {
            level: FlashLevel::Error,
            message: message.to_string(),
            field: None,
        }
    }
}

/// Response data plus an optional one-shot flash.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Outcome<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

impl<T> Outcome<T> {
    pub const fn new(data: T) -> Self {
        Self { data, flash: None }
    }

    #[must_use]
    pub fn with_flash(mut self, flash: Flash) -> Self {
        self.flash = Some(flash);
        self
    }
}

/// What is wrong with a collection index row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DriftKind {
    /// Index lists an ID whose detail record is missing.
    MissingDetail,
    /// Detail record exists but the index does not list it.
    MissingIndexEntry,
    /// Index and detail disagree on `updated_at`.
    StaleUpdatedAt,
}

/// One inconsistency between an index and its detail records.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IndexDrift {
    pub id: String,
    pub kind: DriftKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_flash_keeps_field() {
        let flash = Flash::from_validation(&ValidationError::new("tax.pan", "invalid PAN"));
        assert_eq!(flash.level, FlashLevel::Error);
        assert_eq!(flash.field.as_deref(), Some("tax.pan"));
    }

    #[test]
    fn storage_flash_is_generic() {
        let flash = Flash::for_error_kind(ErrorKind::Storage);
        assert!(!flash.message.to_lowercase().contains("disk"));
        assert!(flash.field.is_none());
    }

    #[test]
    fn outcome_omits_absent_flash() {
        let json = serde_json::to_value(Outcome::new(3)).unwrap();
        assert_eq!(json, serde_json::json!({"data": 3}));
        let json = serde_json::to_value(Outcome::new(3).with_flash(Flash::success("Saved"))).unwrap();
        assert_eq!(json["flash"]["level"], "success");
    }
}
