//! # tender-extract
//!
//! Reads structured fields off an offline tender notice with an LLM.
//!
//! - [`client`]: the [`Extractor`] seam and its HTTP implementation
//! - [`parse`]: strict parsing of the model's reply into `ExtractedFields`
//! - [`policy`]: what a failed run does to previously extracted fields
//! - [`prompts`]: the system/user prompts
//!
//! Parsing never decides what to keep on failure; the caller applies a
//! `ResetPolicy` explicitly.

pub mod client;
pub mod parse;
pub mod policy;
pub mod prompts;

mod error;
mod http;

pub use client::{ExtractionRequest, ExtractionResponse, Extractor, HttpExtractor};
pub use error::ExtractionError;
pub use parse::parse_extracted;
pub use policy::apply_extraction;

use tender_core::entities::ExtractedFields;

/// Prompt, call and parse in one go.
///
/// # Errors
///
/// Returns [`ExtractionError`] if the call fails or the reply does not parse.
pub async fn extract_tender<E: Extractor>(
    extractor: &E,
    notice_text: &str,
) -> Result<ExtractedFields, ExtractionError> {
    let request = prompts::tender_prompt(notice_text);
    let response = extractor.extract(&request).await;
    parse_extracted(&response)
}
