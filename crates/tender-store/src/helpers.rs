//! Record conversion helpers.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;

/// Decode a stored document, reporting the path on failure.
///
/// # Errors
///
/// Returns `StoreError::Corrupt` if the JSON does not fit `T`.
pub fn decode<T: DeserializeOwned>(path: &str, value: serde_json::Value) -> Result<T, StoreError> {
    serde_json::from_value(value).map_err(|e| StoreError::Corrupt {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

/// Encode a record for storage.
///
/// # Errors
///
/// Returns `StoreError::Serialization` if the record cannot be encoded.
pub fn encode<T: Serialize>(record: &T) -> Result<serde_json::Value, StoreError> {
    Ok(serde_json::to_value(record)?)
}

/// Generate a fresh record ID.
///
/// # Errors
///
/// Returns `StoreError::Other` if the OS random source fails.
pub fn new_id(prefix: &str) -> Result<String, StoreError> {
    tender_core::ids::generate_id(prefix)
        .map_err(|e| StoreError::Other(anyhow::anyhow!("id generation failed: {e}")))
}

/// Reject blank required text.
///
/// # Errors
///
/// Returns `StoreError::Validation` on `field` when `value` trims to empty.
pub fn require_text(field: &str, value: &str) -> Result<(), StoreError> {
    if value.trim().is_empty() {
        return Err(StoreError::invalid(field, "must not be empty"));
    }
    Ok(())
}

/// Parse a raw string into a serde-deserializable enum.
///
/// Works with all tender-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `StoreError::Validation` on `field` if the string names no variant.
pub fn parse_enum<T: DeserializeOwned>(field: &str, raw: &str) -> Result<T, StoreError> {
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|_| StoreError::invalid(field, format!("unknown value '{}'", raw.trim())))
}

#[cfg(test)]
mod tests {
    use tender_core::enums::{PackStatus, TemplateScope};

    use super::*;

    #[test]
    fn parse_enum_accepts_loose_spelling() {
        let status: PackStatus = parse_enum("status", " In-Progress ").unwrap();
        assert_eq!(status, PackStatus::InProgress);
        let scope: TemplateScope = parse_enum("scope", "GLOBAL").unwrap();
        assert_eq!(scope, TemplateScope::Global);
    }

    #[test]
    fn parse_enum_names_the_field() {
        let err = parse_enum::<PackStatus>("status", "lost").unwrap_err();
        assert_eq!(err.to_string(), "Validation error: status: unknown value 'lost'");
    }

    #[test]
    fn decode_reports_path() {
        let err = decode::<PackStatus>("contractors/Y/packs/x.json", serde_json::json!(3)).unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref path, .. } if path.ends_with("x.json")));
    }
}
