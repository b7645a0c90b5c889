//! Prompts for tender notice extraction.

use tender_core::entities::ExtractedFields;

use crate::client::ExtractionRequest;

/// Longest notice excerpt sent to the model, in characters.
pub const MAX_NOTICE_CHARS: usize = 24_000;

const SYSTEM_PROMPT: &str = "You read Indian government tender notices (NIT) and return their key \
facts as a single JSON object. Use exactly these keys: {keys}, eligibility_docs, annexures. \
Scalar values are strings; use an empty string when the notice does not say. Dates are \
YYYY-MM-DD. eligibility_docs lists every document a bidder must enclose. annexures lists \
every annexure or format the notice names, with its label, e.g. \"Annexure-B: Affidavit\". \
Return JSON only, without commentary.";

/// Build the request for one notice.
#[must_use]
pub fn tender_prompt(notice_text: &str) -> ExtractionRequest {
    let keys = ExtractedFields::SCALAR_FIELDS.join(", ");
    ExtractionRequest {
        system_prompt: SYSTEM_PROMPT.replace("{keys}", &keys),
        user_prompt: format!("Tender notice:\n\n{}", truncate_chars(notice_text.trim(), MAX_NOTICE_CHARS)),
        expect_json: true,
    }
}

fn truncate_chars(text: &str, max: usize) -> &str {
    text.char_indices().nth(max).map_or(text, |(end, _)| &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_every_field() {
        let request = tender_prompt("NIT No. 12");
        for name in ExtractedFields::SCALAR_FIELDS {
            assert!(request.system_prompt.contains(name), "{name}");
        }
        assert!(request.user_prompt.ends_with("NIT No. 12"));
        assert!(request.expect_json);
    }

    #[test]
    fn long_notices_are_cut_on_a_char_boundary() {
        let text = "₹".repeat(MAX_NOTICE_CHARS + 10);
        let request = tender_prompt(&text);
        let body = request.user_prompt.trim_start_matches("Tender notice:\n\n");
        assert_eq!(body.chars().count(), MAX_NOTICE_CHARS);
    }
}
