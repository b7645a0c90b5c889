//! Outcome of an extraction run for a stored tender.

use tender_core::entities::ExtractedFields;
use tender_core::enums::{ResetPolicy, TenderStatus};

use crate::error::ExtractionError;

/// Fields and status to store after an extraction attempt.
///
/// Success replaces the fields and marks the record `ai_extracted`. Failure
/// marks it `ai_failed` and either resets every field to its default or
/// keeps `previous`, as `policy` says.
#[must_use]
pub fn apply_extraction(
    previous: &ExtractedFields,
    result: Result<ExtractedFields, ExtractionError>,
    policy: ResetPolicy,
) -> (ExtractedFields, TenderStatus) {
    match result {
        Ok(fields) => (fields, TenderStatus::AiExtracted),
        Err(e) => {
            tracing::warn!(error = %e, policy = %policy, "extraction failed; applying reset policy");
            let fields = match policy {
                ResetPolicy::ResetToDefaults => ExtractedFields::default(),
                ResetPolicy::KeepPrevious => previous.clone(),
            };
            (fields, TenderStatus::AiFailed)
        }
    }
}
