//! Strict parsing of an extraction reply into `ExtractedFields`.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tender_core::entities::ExtractedFields;

use crate::client::ExtractionResponse;
use crate::error::ExtractionError;

/// Parse a collaborator reply.
///
/// Uses the pre-parsed `json` when present, otherwise the raw text with any
/// Markdown code fence removed. Scalar fields accept strings or numbers;
/// list fields accept an array of strings or a single string. Values are
/// trimmed, blanks dropped and list entries deduplicated ignoring case.
///
/// # Errors
///
/// Returns [`ExtractionError`] if the call failed, the reply is not a JSON
/// object, or the object names none of the tender fields.
pub fn parse_extracted(response: &ExtractionResponse) -> Result<ExtractedFields, ExtractionError> {
    if !response.ok {
        return Err(ExtractionError::Failed {
            errors: response.errors.clone(),
        });
    }

    let value = match &response.json {
        Some(value) => value.clone(),
        None => serde_json::from_str(strip_code_fence(&response.raw_text)).map_err(|e| {
            ExtractionError::NotJson {
                reason: e.to_string(),
            }
        })?,
    };
    let Value::Object(object) = value else {
        return Err(ExtractionError::NotObject);
    };

    let mut fields = ExtractedFields::default();
    let mut recognised = false;
    for name in ExtractedFields::SCALAR_FIELDS {
        if let Some(raw) = object.get(name) {
            recognised = true;
            if let Some(slot) = fields.scalar_mut(name) {
                *slot = scalar_text(raw);
            }
        }
    }
    recognised |= read_list(&object, "eligibility_docs", &mut fields.eligibility_docs);
    recognised |= read_list(&object, "annexures", &mut fields.annexures);

    if !recognised {
        return Err(ExtractionError::NoFields);
    }
    Ok(fields)
}

/// Body of a ```` ```json ```` fence, or the trimmed input if there is none.
#[must_use]
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn read_list(object: &Map<String, Value>, key: &str, out: &mut Vec<String>) -> bool {
    let Some(raw) = object.get(key) else {
        return false;
    };
    let entries: Vec<String> = match raw {
        Value::Array(items) => items.iter().map(scalar_text).collect(),
        Value::String(s) => s.lines().map(|line| line.trim().to_string()).collect(),
        _ => Vec::new(),
    };
    let mut seen = HashSet::new();
    out.extend(
        entries
            .into_iter()
            .filter(|entry| !entry.is_empty())
            .filter(|entry| seen.insert(entry.to_lowercase())),
    );
    true
}
