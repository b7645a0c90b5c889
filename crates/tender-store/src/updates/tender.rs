//! Tender/workorder field edit builder.

use std::collections::BTreeMap;

use serde::Serialize;
use tender_core::entities::TenderRecord;

use crate::error::StoreError;

/// Manual edits to a tender record and its extracted fields.
///
/// `fields` is keyed by `ExtractedFields` scalar names (`tender_number`,
/// `emd`, ...).
#[derive(Debug, Clone, Default, Serialize)]
pub struct TenderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligibility_docs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annexures: Option<Vec<String>>,
}

impl TenderUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.fields.is_empty()
            && self.eligibility_docs.is_none()
            && self.annexures.is_none()
    }

    /// Apply the edits.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` naming the first unknown field; the
    /// record is left untouched in that case.
    pub fn apply_to(&self, record: &mut TenderRecord) -> Result<(), StoreError> {
        let mut extracted = record.extracted.clone();
        for (name, value) in &self.fields {
            let slot = extracted
                .scalar_mut(name)
                .ok_or_else(|| StoreError::invalid(name.as_str(), "unknown tender field"))?;
            *slot = value.trim().to_string();
        }
        if let Some(docs) = &self.eligibility_docs {
            extracted.eligibility_docs = clean_list(docs);
        }
        if let Some(annexures) = &self.annexures {
            extracted.annexures = clean_list(annexures);
        }
        if let Some(title) = &self.title {
            record.title = title.trim().to_string();
        }
        record.extracted = extracted;
        Ok(())
    }
}

fn clean_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
        .collect()
}

pub struct TenderUpdateBuilder(TenderUpdate);

impl TenderUpdateBuilder {
    pub fn new() -> Self {
        Self(TenderUpdate::default())
    }

    pub fn title(mut self, val: impl Into<String>) -> Self {
        self.0.title = Some(val.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, val: impl Into<String>) -> Self {
        self.0.fields.insert(name.into(), val.into());
        self
    }

    pub fn eligibility_docs(mut self, val: Vec<String>) -> Self {
        self.0.eligibility_docs = Some(val);
        self
    }

    pub fn annexures(mut self, val: Vec<String>) -> Self {
        self.0.annexures = Some(val);
        self
    }

    pub fn build(self) -> TenderUpdate {
        self.0
    }
}

impl Default for TenderUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
