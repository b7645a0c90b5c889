//! ID prefix constants and helpers.
//!
//! IDs look like `pck-a3f8b2c1`: a three-letter prefix, a dash and eight hex
//! characters. Record IDs double as file names in the record store, so
//! anything arriving from user input goes through [`validate_record_id`].

use crate::errors::ValidationError;

pub const PREFIX_PACK: &str = "pck";
pub const PREFIX_TEMPLATE: &str = "tpl";
pub const PREFIX_TENDER: &str = "tnd";
pub const PREFIX_WORKORDER: &str = "wko";
pub const PREFIX_VAULT: &str = "vlt";
pub const PREFIX_DOC: &str = "doc";
pub const PREFIX_ITEM: &str = "itm";
pub const PREFIX_ANNEXURE: &str = "anx";

/// Longest accepted record ID.
pub const MAX_ID_LEN: usize = 64;

/// Generate a prefixed random ID. Returns e.g. `"pck-a3f8b2c1"`.
///
/// # Errors
///
/// Returns an error if the OS random source is unavailable.
pub fn generate_id(prefix: &str) -> Result<String, getrandom::Error> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes)?;
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{prefix}-{hex}"))
}

/// Check that an ID is safe to use as a path segment.
///
/// # Errors
///
/// Returns a `ValidationError` for empty, overlong, or non `[A-Za-z0-9_-]` IDs.
pub fn validate_record_id(field: &str, id: &str) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    if id.len() > MAX_ID_LEN {
        return Err(ValidationError::new(
            field,
            format!("must be at most {MAX_ID_LEN} characters"),
        ));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::new(
            field,
            "may only contain letters, digits, '-' and '_'",
        ));
    }
    Ok(())
}
