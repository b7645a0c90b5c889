use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityType, TenderStatus};
use crate::time::Timestamp;

/// Whether a source document is a tender notice or an awarded workorder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TenderKind {
    #[default]
    OfflineTender,
    Workorder,
}

impl TenderKind {
    /// Store collection the record lives in.
    #[must_use]
    pub const fn entity_type(self) -> EntityType {
        match self {
            Self::OfflineTender => EntityType::Tender,
            Self::Workorder => EntityType::Workorder,
        }
    }

    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::OfflineTender => crate::ids::PREFIX_TENDER,
            Self::Workorder => crate::ids::PREFIX_WORKORDER,
        }
    }
}

/// An offline tender notice or workorder with its extracted fields.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TenderRecord {
    pub id: String,
    #[serde(default)]
    pub kind: TenderKind,
    pub owner_yoj_id: String,
    pub title: String,
    /// Path or name of the uploaded notice, if any.
    #[serde(default)]
    pub source_file: Option<String>,
    #[serde(default)]
    pub extracted: ExtractedFields,
    #[serde(default)]
    pub status: TenderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Structured fields read off a tender notice, manually or by AI extraction.
///
/// Dates are kept as the ISO-8601 text they were entered with; fees are free
/// text because notices print them that way.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExtractedFields {
    #[serde(default)]
    pub tender_number: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub work_location: String,
    #[serde(default)]
    pub publish_date: String,
    #[serde(default)]
    pub pre_bid_date: String,
    #[serde(default)]
    pub submission_deadline: String,
    #[serde(default)]
    pub opening_date: String,
    #[serde(default)]
    pub tender_fee: String,
    #[serde(default)]
    pub emd: String,
    #[serde(default)]
    pub completion_period: String,
    #[serde(default)]
    pub validity_days: String,
    #[serde(default)]
    pub eligibility_docs: Vec<String>,
    #[serde(default)]
    pub annexures: Vec<String>,
}

impl ExtractedFields {
    /// Names of the scalar fields, in display order.
    pub const SCALAR_FIELDS: [&'static str; 12] = [
        "tender_number",
        "title",
        "department",
        "work_location",
        "publish_date",
        "pre_bid_date",
        "submission_deadline",
        "opening_date",
        "tender_fee",
        "emd",
        "completion_period",
        "validity_days",
    ];

    /// Mutable access to a scalar field by name.
    pub fn scalar_mut(&mut self, name: &str) -> Option<&mut String> {
        let slot = match name {
            "tender_number" => &mut self.tender_number,
            "title" => &mut self.title,
            "department" => &mut self.department,
            "work_location" => &mut self.work_location,
            "publish_date" => &mut self.publish_date,
            "pre_bid_date" => &mut self.pre_bid_date,
            "submission_deadline" => &mut self.submission_deadline,
            "opening_date" => &mut self.opening_date,
            "tender_fee" => &mut self.tender_fee,
            "emd" => &mut self.emd,
            "completion_period" => &mut self.completion_period,
            "validity_days" => &mut self.validity_days,
            _ => return None,
        };
        Some(slot)
    }

    /// Read a scalar field by name.
    #[must_use]
    pub fn scalar(&self, name: &str) -> Option<&str> {
        let value = match name {
            "tender_number" => &self.tender_number,
            "title" => &self.title,
            "department" => &self.department,
            "work_location" => &self.work_location,
            "publish_date" => &self.publish_date,
            "pre_bid_date" => &self.pre_bid_date,
            "submission_deadline" => &self.submission_deadline,
            "opening_date" => &self.opening_date,
            "tender_fee" => &self.tender_fee,
            "emd" => &self.emd,
            "completion_period" => &self.completion_period,
            "validity_days" => &self.validity_days,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Whether nothing has been filled in yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_accessors_cover_every_named_field() {
        let mut fields = ExtractedFields::default();
        for name in ExtractedFields::SCALAR_FIELDS {
            *fields.scalar_mut(name).unwrap() = format!("v-{name}");
        }
        for name in ExtractedFields::SCALAR_FIELDS {
            assert_eq!(fields.scalar(name), Some(format!("v-{name}").as_str()));
        }
        assert!(fields.scalar_mut("eligibility_docs").is_none());
        assert!(!fields.is_empty());
    }

    #[test]
    fn kind_picks_collection() {
        assert_eq!(TenderKind::Workorder.entity_type(), EntityType::Workorder);
        assert_eq!(TenderKind::OfflineTender.id_prefix(), "tnd");
    }
}
